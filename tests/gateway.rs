mod common;

use chrono::NaiveDateTime;
use common::{seeded_file, seeded_gateway, ticket_count, SEED_CUSTOMERS, SEED_TICKETS};
use serde_json::{json, Map, Value};
use support_tools::model::TIMESTAMP_FORMAT;
use support_tools::store::connect;
use support_tools::{
    create_database, database_stats, dispatch, AppError, CustomerStatus, GatewayConfig, Priority, SupportService, TicketStatus,
    ToolGateway,
};

fn fields(v: Value) -> Map<String, Value> {
    v.as_object().cloned().expect("object")
}

#[tokio::test]
async fn unknown_customers_are_not_found_sentinels() {
    let (_dir, gateway) = seeded_gateway().await;
    for id in [0, -1, 11, 999, i64::MAX] {
        assert!(gateway.get_customer(id).await.is_none());
        assert!(gateway.get_customer_history(id).await.is_none());
    }
}

#[tokio::test]
async fn list_without_filter_returns_everyone_in_id_order() {
    let (_dir, gateway) = seeded_gateway().await;
    let customers = gateway.list_customers(None, 100).await;
    let ids: Vec<i64> = customers.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=SEED_CUSTOMERS as i64).collect::<Vec<_>>());
    assert_eq!(customers[0].name, "Alice Johnson");
    assert_eq!(customers[9].name, "Jack Taylor");
}

#[tokio::test]
async fn list_respects_limit_and_status() {
    let (_dir, gateway) = seeded_gateway().await;
    for limit in [0, 1, 3, 10, 50] {
        assert!(gateway.list_customers(None, limit).await.len() as i64 <= limit);
    }
    let active = gateway.list_customers(Some("active"), 3).await;
    assert_eq!(active.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(active.iter().all(|c| c.status == CustomerStatus::Active));

    let disabled = gateway.list_customers(Some("disabled"), 10).await;
    assert_eq!(disabled.len(), 1);
    assert_eq!(disabled[0].name, "Frank Wilson");
}

#[tokio::test]
async fn list_rejects_bad_status_and_negative_limit() {
    let (_dir, gateway) = seeded_gateway().await;
    assert!(gateway.list_customers(Some("ACTIVE"), 10).await.is_empty());
    assert!(gateway.list_customers(Some("gone"), 10).await.is_empty());
    assert!(gateway.list_customers(None, -5).await.is_empty());
}

#[tokio::test]
async fn update_with_nothing_applicable_changes_nothing() {
    let (_dir, gateway) = seeded_gateway().await;
    let before = gateway.get_customer(2).await.unwrap();
    assert!(!gateway.update_customer(2, &Map::new()).await);
    assert!(!gateway.update_customer(2, &fields(json!({ "id": 50, "tier": "gold" }))).await);
    assert!(!gateway.update_customer(2, &fields(json!({ "status": "banned" }))).await);
    assert_eq!(gateway.get_customer(2).await.unwrap(), before);
}

#[tokio::test]
async fn update_changes_exactly_the_given_fields_and_stamps_updated_at() {
    let (_dir, gateway) = seeded_gateway().await;
    sqlx::query("UPDATE customers SET updated_at = '2000-01-01 00:00:00' WHERE id = 2")
        .execute(gateway.pool())
        .await
        .unwrap();
    let before = gateway.get_customer(2).await.unwrap();

    let ok = gateway
        .update_customer(
            2,
            &fields(json!({ "email": "bob@new.example", "phone": null, "created_at": "ignored" })),
        )
        .await;
    assert!(ok);

    let after = gateway.get_customer(2).await.unwrap();
    assert_eq!(after.email.as_deref(), Some("bob@new.example"));
    assert_eq!(after.phone, None);
    assert_eq!(after.id, before.id);
    assert_eq!(after.name, before.name);
    assert_eq!(after.status, before.status);
    assert_eq!(after.created_at, before.created_at);
    let old = NaiveDateTime::parse_from_str("2000-01-01 00:00:00", TIMESTAMP_FORMAT).unwrap();
    assert!(after.updated_at > old);

    assert_eq!(gateway.get_customer(3).await.unwrap().email.as_deref(), Some("carol.white@mail.com"));
}

#[tokio::test]
async fn update_of_missing_customer_fails() {
    let (_dir, gateway) = seeded_gateway().await;
    assert!(!gateway.update_customer(404, &fields(json!({ "name": "Nobody" }))).await);
    assert!(gateway.get_customer(404).await.is_none());
}

#[tokio::test]
async fn create_ticket_for_missing_customer_writes_nothing() {
    let (_dir, gateway) = seeded_gateway().await;
    assert_eq!(gateway.create_ticket(999, "help", "high").await, None);
    assert_eq!(ticket_count(&gateway).await, SEED_TICKETS as i64);
}

#[tokio::test]
async fn create_ticket_rejects_bad_priority_and_blank_issue() {
    let (_dir, gateway) = seeded_gateway().await;
    for priority in ["urgent", "HIGH", ""] {
        assert_eq!(gateway.create_ticket(1, "help", priority).await, None);
    }
    assert_eq!(gateway.create_ticket(1, "   ", "low").await, None);
    assert_eq!(ticket_count(&gateway).await, SEED_TICKETS as i64);
}

#[tokio::test]
async fn created_tickets_are_always_open() {
    let (_dir, gateway) = seeded_gateway().await;
    let id = gateway.create_ticket(3, "Cannot log in", "high").await.unwrap();
    let tickets = gateway.get_tickets_by_criteria(None, None, Some(&[3])).await;
    let created = tickets.iter().find(|t| t.id == id).unwrap();
    assert_eq!(created.status, TicketStatus::Open);
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.customer_id, 3);
    assert_eq!(created.issue, "Cannot log in");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ticket_creation_all_succeeds() {
    let (_dir, gateway) = seeded_gateway().await;
    let rounds = 10;
    let per_round = 8;
    for _ in 0..rounds {
        let handles: Vec<_> = (0..per_round)
            .map(|i| {
                let gateway = gateway.clone();
                tokio::spawn(async move { gateway.create_ticket(1 + i % 5, "concurrent", "low").await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
    }
    assert_eq!(ticket_count(&gateway).await, (SEED_TICKETS + rounds * per_round as usize) as i64);
}

#[tokio::test]
async fn empty_filter_values_mean_no_filter() {
    let (_dir, gateway) = seeded_gateway().await;
    assert_eq!(gateway.list_customers(Some(""), 100).await.len(), SEED_CUSTOMERS);

    let listed = dispatch(&gateway, "list_customers", json!({ "status": "" })).await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), SEED_CUSTOMERS);

    let high = gateway.get_tickets_by_criteria(Some(""), Some("high"), None).await;
    assert_eq!(high.len(), 8);
    assert!(high.iter().all(|t| t.priority == Priority::High));
    assert_eq!(
        gateway.get_tickets_by_criteria(Some(""), Some(""), None).await.len(),
        SEED_TICKETS
    );
}

#[tokio::test]
async fn history_counts_match_returned_tickets_for_every_customer() {
    let (_dir, gateway) = seeded_gateway().await;
    let mut total = 0;
    for id in 1..=SEED_CUSTOMERS as i64 {
        let history = gateway.get_customer_history(id).await.unwrap();
        assert_eq!(history.customer.id, id);
        assert_eq!(history.ticket_count, history.tickets.len());
        assert_eq!(
            history.open_tickets,
            history.tickets.iter().filter(|t| t.status == TicketStatus::Open).count()
        );
        assert_eq!(
            history.high_priority_tickets,
            history.tickets.iter().filter(|t| t.priority == Priority::High).count()
        );
        assert!(history.tickets.iter().all(|t| t.customer_id == id));
        total += history.ticket_count;
    }
    assert_eq!(total, SEED_TICKETS);

    let frank = gateway.get_customer_history(6).await.unwrap();
    assert_eq!(frank.ticket_count, 0);
    let alice = gateway.get_customer_history(1).await.unwrap();
    assert_eq!((alice.ticket_count, alice.open_tickets, alice.high_priority_tickets), (3, 1, 1));
}

#[tokio::test]
async fn history_lists_newest_ticket_first() {
    let (_dir, gateway) = seeded_gateway().await;
    let id = gateway.create_ticket(4, "Another export problem", "low").await.unwrap();
    let history = gateway.get_customer_history(4).await.unwrap();
    assert_eq!(history.tickets[0].id, id);
    assert!(history
        .tickets
        .windows(2)
        .all(|w| (w[0].created_at, w[0].id) > (w[1].created_at, w[1].id)));
}

#[tokio::test]
async fn scenario_new_ticket_shows_up_in_history() {
    let (_dir, gateway) = seeded_gateway().await;
    assert_eq!(gateway.get_customer(1).await.unwrap().name, "Alice Johnson");

    let before = gateway.get_customer_history(1).await.unwrap();
    let existing: Vec<i64> = gateway
        .get_tickets_by_criteria(None, None, None)
        .await
        .iter()
        .map(|t| t.id)
        .collect();

    let id = gateway.create_ticket(1, "x", "low").await.unwrap();
    assert!(!existing.contains(&id));

    let after = gateway.get_customer_history(1).await.unwrap();
    assert_eq!(after.ticket_count, before.ticket_count + 1);
    assert_eq!(after.open_tickets, before.open_tickets + 1);
    assert_eq!(after.high_priority_tickets, before.high_priority_tickets);
}

#[tokio::test]
async fn scenario_reactivate_disabled_customer() {
    let (_dir, gateway) = seeded_gateway().await;
    let frank = gateway.get_customer(6).await.unwrap();
    assert_eq!(frank.name, "Frank Wilson");
    assert_eq!(frank.status, CustomerStatus::Disabled);

    assert!(gateway.update_customer(6, &fields(json!({ "status": "active" }))).await);
    assert_eq!(gateway.get_customer(6).await.unwrap().status, CustomerStatus::Active);
}

#[tokio::test]
async fn ticket_criteria_are_combined_with_and() {
    let (_dir, gateway) = seeded_gateway().await;
    assert_eq!(gateway.get_tickets_by_criteria(None, None, None).await.len(), SEED_TICKETS);
    assert_eq!(gateway.get_tickets_by_criteria(None, None, Some(&[])).await.len(), SEED_TICKETS);

    let urgent = gateway.get_tickets_by_criteria(Some("open"), Some("high"), None).await;
    assert_eq!(urgent.len(), 7);
    assert!(urgent
        .iter()
        .all(|t| t.status == TicketStatus::Open && t.priority == Priority::High));

    let some = gateway.get_tickets_by_criteria(None, None, Some(&[1, 4])).await;
    assert_eq!(some.len(), 6);
    assert!(some.iter().all(|t| t.customer_id == 1 || t.customer_id == 4));

    let narrow = gateway
        .get_tickets_by_criteria(Some("open"), Some("high"), Some(&[7, 9]))
        .await;
    assert_eq!(narrow.len(), 4);

    assert!(gateway.get_tickets_by_criteria(Some("closed"), None, None).await.is_empty());
}

#[tokio::test]
async fn server_stats_count_by_predicate() {
    let (_dir, gateway) = seeded_gateway().await;
    let stats = gateway.get_server_stats().await.unwrap();
    assert_eq!(stats.active_customers, 9);
    assert_eq!(stats.disabled_customers, 1);
    assert_eq!(stats.open_tickets, 8);
    assert_eq!(stats.in_progress_tickets, 4);
    assert_eq!(stats.high_priority_tickets, 8);
}

#[tokio::test]
async fn typed_service_distinguishes_not_found_from_faults() {
    let (_dir, gateway) = seeded_gateway().await;
    let err = SupportService::create_ticket(gateway.pool(), 999, "help", Priority::Low)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(!err.is_fault());

    gateway.pool().close().await;
    let err = SupportService::get_customer(gateway.pool(), 1).await.unwrap_err();
    assert!(err.is_fault());
    // The gateway degrades the same fault to its sentinel.
    assert!(gateway.get_customer(1).await.is_none());
    assert!(gateway.get_customer_history(1).await.is_none());
    assert!(gateway.list_customers(None, 10).await.is_empty());
    assert!(!gateway.update_customer(1, &fields(json!({ "name": "A" }))).await);
    assert_eq!(gateway.create_ticket(1, "x", "low").await, None);
}

#[tokio::test]
async fn storage_constraints_back_up_validation() {
    let (_dir, gateway) = seeded_gateway().await;
    let bad_status = sqlx::query("INSERT INTO tickets (customer_id, issue, status) VALUES (1, 'x', 'closed')")
        .execute(gateway.pool())
        .await;
    assert!(bad_status.is_err());
    let orphan = sqlx::query("INSERT INTO tickets (customer_id, issue) VALUES (999, 'x')")
        .execute(gateway.pool())
        .await;
    assert!(orphan.is_err());
    let bad_customer = sqlx::query("UPDATE customers SET status = 'banned' WHERE id = 1")
        .execute(gateway.pool())
        .await;
    assert!(bad_customer.is_err());
    assert_eq!(ticket_count(&gateway).await, SEED_TICKETS as i64);
}

#[tokio::test]
async fn opening_requires_an_existing_complete_database() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.db");
    let err = ToolGateway::open(&GatewayConfig::for_database(missing.clone()))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AppError::Schema(_)));
    assert!(!missing.exists());

    let partial = dir.path().join("partial.db");
    let pool = connect(&partial, true, 1).await.unwrap();
    sqlx::query("CREATE TABLE customers (id INTEGER PRIMARY KEY)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
    let err = ToolGateway::open(&GatewayConfig::for_database(partial))
        .await
        .err()
        .unwrap();
    match err {
        AppError::Schema(msg) => assert!(msg.contains("tickets")),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn setup_is_destructive_and_repeatable() {
    let (_dir, path) = seeded_file().await;
    let gateway = ToolGateway::open(&GatewayConfig::for_database(path.clone())).await.unwrap();
    gateway.create_ticket(2, "extra", "medium").await.unwrap();
    assert!(gateway.update_customer(1, &fields(json!({ "name": "Renamed" }))).await);
    gateway.pool().close().await;

    let pool = create_database(&path).await.unwrap();
    let stats = database_stats(&pool).await.unwrap();
    assert_eq!(
        stats.customers_by_status,
        vec![("active".to_string(), 9), ("disabled".to_string(), 1)]
    );
    assert_eq!(
        stats.tickets_by_status,
        vec![
            ("in_progress".to_string(), 4),
            ("open".to_string(), 8),
            ("resolved".to_string(), 4)
        ]
    );
    assert_eq!(
        stats.tickets_by_priority,
        vec![("high".to_string(), 8), ("low".to_string(), 5), ("medium".to_string(), 3)]
    );
    pool.close().await;

    let gateway = ToolGateway::open(&GatewayConfig::for_database(path)).await.unwrap();
    assert_eq!(gateway.get_customer(1).await.unwrap().name, "Alice Johnson");
    assert_eq!(ticket_count(&gateway).await, SEED_TICKETS as i64);
}
