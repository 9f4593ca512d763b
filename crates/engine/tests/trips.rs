use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, PassengerNewCmd, Trip, TripNewCmd, TripUpdateCmd, UserNewCmd};
use migration::MigratorTrait;
use uuid::Uuid;

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

async fn seed_user(db: &DatabaseConnection, email: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (email, name, password_hash) VALUES (?, ?, ?)",
        vec![email.into(), "Test".into(), "not-a-hash".into()],
    ))
    .await
    .unwrap();
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    seed_user(&db, ALICE).await;
    seed_user(&db, BOB).await;
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    seed_user(&db, ALICE).await;
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

fn shares(trip: &Trip) -> Vec<f64> {
    trip.passengers.iter().map(|p| p.share_amount()).collect()
}

fn names(trip: &Trip) -> Vec<&str> {
    trip.passengers.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn new_trip_persists_computed_shares() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Lake Como", 100.0)
                .start("Milano")
                .date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
                .passenger("A", 20.0)
                .passenger("B", 0.0),
        )
        .await
        .unwrap();
    assert_eq!(shares(&created), [60.0, 40.0]);

    let stored = engine.trip_snapshot(created.id, ALICE).await.unwrap();
    assert_eq!(names(&stored), ["A", "B"]);
    assert_eq!(shares(&stored), [60.0, 40.0]);
    assert_eq!(stored.start.as_deref(), Some("Milano"));
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2025, 7, 1));
    assert_eq!(stored.total_cost, 100.0);
}

#[tokio::test]
async fn recompute_twice_does_not_drift() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 100.0)
                .passenger("A", 20.0)
                .passenger("B", 0.0),
        )
        .await
        .unwrap();

    let first = engine.recompute_split(trip.id, ALICE).await.unwrap();
    let second = engine.recompute_split(trip.id, ALICE).await.unwrap();
    assert_eq!(shares(&first), [60.0, 40.0]);
    assert_eq!(shares(&second), [60.0, 40.0]);

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(shares(&stored), [60.0, 40.0]);
}

#[tokio::test]
async fn surcharges_above_cost_are_kept_as_is() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 10.0).passenger("A", 15.0))
        .await
        .unwrap();

    let summary = engine.split_summary(trip.id, ALICE).await.unwrap();
    assert_eq!(summary.total_cost, 10.0);
    assert_eq!(summary.total_surcharge, 15.0);
    assert_eq!(summary.total_shares, 15.0);
    assert_eq!(summary.shares[0].amount, 15.0);
}

#[tokio::test]
async fn trip_without_passengers_is_valid() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Nowhere", 0.0))
        .await
        .unwrap();
    assert!(trip.passengers.is_empty());

    let recomputed = engine.recompute_split(trip.id, ALICE).await.unwrap();
    assert!(recomputed.passengers.is_empty());
}

#[tokio::test]
async fn deleting_a_passenger_rebalances_the_others() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 90.0)
                .passenger("A", 0.0)
                .passenger("B", 0.0)
                .passenger("C", 0.0),
        )
        .await
        .unwrap();
    assert_eq!(shares(&trip), [30.0, 30.0, 30.0]);

    let b = trip.passengers[1].id;
    let updated = engine.delete_passenger(trip.id, b, ALICE).await.unwrap();
    assert_eq!(names(&updated), ["A", "C"]);
    assert_eq!(shares(&updated), [45.0, 45.0]);

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(names(&stored), ["A", "C"]);
    assert_eq!(shares(&stored), [45.0, 45.0]);
}

#[tokio::test]
async fn deleting_an_unknown_passenger_changes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 50.0).passenger("A", 0.0))
        .await
        .unwrap();

    let err = engine
        .delete_passenger(trip.id, Uuid::new_v4(), ALICE)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("passenger not exists".to_string())
    );

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(shares(&stored), [50.0]);
}

#[tokio::test]
async fn adding_a_passenger_rebalances_and_appends() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 100.0).passenger("A", 0.0))
        .await
        .unwrap();
    assert_eq!(shares(&trip), [100.0]);

    let updated = engine
        .add_passenger(PassengerNewCmd::new(trip.id, ALICE, "B").surcharge(10.0))
        .await
        .unwrap();
    assert_eq!(names(&updated), ["A", "B"]);
    assert_eq!(shares(&updated), [45.0, 55.0]);

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(names(&stored), ["A", "B"]);
    assert_eq!(shares(&stored), [45.0, 55.0]);

    let updated = engine
        .add_passenger(PassengerNewCmd::new(trip.id, ALICE, "C"))
        .await
        .unwrap();
    assert_eq!(names(&updated), ["A", "B", "C"]);
    assert_eq!(shares(&updated), [30.0, 40.0, 30.0]);

    let stored = engine.recompute_split(trip.id, ALICE).await.unwrap();
    assert_eq!(names(&stored), ["A", "B", "C"]);
    assert_eq!(shares(&stored), [30.0, 40.0, 30.0]);
}

#[tokio::test]
async fn changing_total_cost_rebalances() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 100.0)
                .passenger("A", 20.0)
                .passenger("B", 0.0),
        )
        .await
        .unwrap();

    let updated = engine
        .update_trip(
            TripUpdateCmd::new(trip.id, ALICE)
                .total_cost(200.0)
                .destination("Napoli"),
        )
        .await
        .unwrap();
    assert_eq!(updated.destination, "Napoli");
    assert_eq!(shares(&updated), [110.0, 90.0]);

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(stored.destination, "Napoli");
    assert_eq!(stored.total_cost, 200.0);
    assert_eq!(shares(&stored), [110.0, 90.0]);
}

#[tokio::test]
async fn invalid_surcharge_rejects_the_whole_trip() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 100.0)
                .passenger("A", 0.0)
                .passenger("B", -5.0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    assert!(engine.list_trips(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_update_leaves_trip_untouched() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 100.0).passenger("A", 0.0))
        .await
        .unwrap();

    let err = engine
        .update_trip(TripUpdateCmd::new(trip.id, ALICE).total_cost(-1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_passenger(PassengerNewCmd::new(trip.id, ALICE, "B").surcharge(f64::NAN))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(stored.total_cost, 100.0);
    assert_eq!(names(&stored), ["A"]);
    assert_eq!(shares(&stored), [100.0]);
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_trip(TripNewCmd::new(ALICE, "   ", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 10.0).passenger(" ", 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn unknown_owner_cannot_create_trips() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_trip(TripNewCmd::new("carol@example.com", "Rome", 10.0))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));
}

#[tokio::test]
async fn other_users_trips_look_missing() {
    let (engine, _db) = engine_with_db().await;
    let trip = engine
        .new_trip(TripNewCmd::new(ALICE, "Rome", 100.0).passenger("A", 0.0))
        .await
        .unwrap();
    let not_found = EngineError::KeyNotFound("trip not exists".to_string());

    assert_eq!(
        engine.trip_snapshot(trip.id, BOB).await.unwrap_err(),
        not_found
    );
    assert_eq!(
        engine.recompute_split(trip.id, BOB).await.unwrap_err(),
        not_found
    );
    assert_eq!(
        engine
            .delete_passenger(trip.id, trip.passengers[0].id, BOB)
            .await
            .unwrap_err(),
        not_found
    );
    assert_eq!(
        engine
            .add_passenger(PassengerNewCmd::new(trip.id, BOB, "Mallory"))
            .await
            .unwrap_err(),
        not_found
    );
    assert_eq!(engine.delete_trip(trip.id, BOB).await.unwrap_err(), not_found);
    assert!(engine.list_trips(BOB).await.unwrap().is_empty());
    assert!(engine.list_passengers(BOB).await.unwrap().is_empty());

    // Still there for the owner.
    let stored = engine.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(shares(&stored), [100.0]);
}

#[tokio::test]
async fn delete_trip_removes_its_passengers() {
    let (engine, _db) = engine_with_db().await;
    let kept = engine
        .new_trip(TripNewCmd::new(ALICE, "Kept", 10.0).passenger("K", 0.0))
        .await
        .unwrap();
    let trip = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 100.0)
                .passenger("A", 0.0)
                .passenger("B", 0.0),
        )
        .await
        .unwrap();
    assert_eq!(engine.list_passengers(ALICE).await.unwrap().len(), 3);

    engine.delete_trip(trip.id, ALICE).await.unwrap();

    assert_eq!(
        engine.trip_snapshot(trip.id, ALICE).await.unwrap_err(),
        EngineError::KeyNotFound("trip not exists".to_string())
    );
    let passengers = engine.list_passengers(ALICE).await.unwrap();
    assert_eq!(passengers.len(), 1);
    assert_eq!(passengers[0].0, kept.id);
    assert_eq!(passengers[0].1.name, "K");
}

#[tokio::test]
async fn list_trips_returns_passengers_in_order() {
    let (engine, _db) = engine_with_db().await;
    for destination in ["Rome", "Paris"] {
        engine
            .new_trip(
                TripNewCmd::new(ALICE, destination, 30.0)
                    .passenger("first", 0.0)
                    .passenger("second", 0.0)
                    .passenger("third", 0.0),
            )
            .await
            .unwrap();
    }

    let trips = engine.list_trips(ALICE).await.unwrap();
    assert_eq!(trips.len(), 2);
    for trip in &trips {
        assert_eq!(names(trip), ["first", "second", "third"]);
        assert_eq!(shares(trip), [10.0, 10.0, 10.0]);
    }
}

#[tokio::test]
async fn register_and_authenticate() {
    let (engine, _db) = engine_with_db().await;
    let user = engine
        .register_user(UserNewCmd {
            name: "Carol".to_string(),
            email: " Carol@Example.com ".to_string(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.email, "carol@example.com");

    let authed = engine
        .authenticate("CAROL@example.com", "s3cret")
        .await
        .unwrap();
    assert_eq!(authed, user);

    assert_eq!(
        engine
            .authenticate("carol@example.com", "wrong")
            .await
            .unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(
        engine.authenticate("nobody@example.com", "s3cret").await.unwrap_err(),
        EngineError::InvalidCredentials
    );
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let cmd = UserNewCmd {
        name: "Carol".to_string(),
        email: "carol@example.com".to_string(),
        password: "s3cret".to_string(),
    };
    engine.register_user(cmd.clone()).await.unwrap();

    assert_eq!(
        engine.register_user(cmd).await.unwrap_err(),
        EngineError::ExistingKey("carol@example.com".to_string())
    );
}

#[tokio::test]
async fn shares_survive_reconnect() {
    let (engine, db, url, path) = engine_with_file_db().await;
    let trip = engine
        .new_trip(
            TripNewCmd::new(ALICE, "Rome", 100.0)
                .passenger("A", 20.0)
                .passenger("B", 0.0),
        )
        .await
        .unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder().database(db2.clone()).build().await.unwrap();

    let stored = engine2.trip_snapshot(trip.id, ALICE).await.unwrap();
    assert_eq!(shares(&stored), [60.0, 40.0]);

    drop(db2);
    let _ = std::fs::remove_file(path);
}
