use anyhow::Result;
use chrono::Utc;
use sea_orm::{EntityTrait, Set};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{customer, user};

fn unique_mobile() -> String {
    let n = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("{n:010}")
}

fn new_customer(mobile: &str, email: &str) -> customer::ActiveModel {
    let now = Utc::now().into();
    customer::ActiveModel {
        customer_name: Set("Acme Traders".into()),
        customer_owner_name: Set(None),
        customer_mobile_number: Set(mobile.into()),
        customer_email_id: Set(email.into()),
        customer_address: Set("221B Market Road, Pune".into()),
        customer_gst_no: Set("22AAAAA0000A1Z5".into()),
        logo: Set(None),
        customer_status: Set(true),
        customer_type_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

#[tokio::test]
async fn duplicate_active_mobile_is_a_conflict() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()) };
    let mobile = unique_mobile();

    let first = customer::insert(&db, new_customer(&mobile, &format!("{}@acme.in", Uuid::new_v4()))).await?;
    let dup = customer::insert(&db, new_customer(&mobile, &format!("{}@acme.in", Uuid::new_v4()))).await;
    assert!(matches!(dup, Err(ModelError::Conflict { field: "customer_mobile_number" })));

    customer::hard_delete(&db, first.customer_id).await?;
    Ok(())
}

#[tokio::test]
async fn soft_delete_frees_unique_values() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()) };
    let mobile = unique_mobile();
    let email = format!("{}@acme.in", Uuid::new_v4());

    let first = customer::insert(&db, new_customer(&mobile, &email)).await?;
    assert_eq!(customer::soft_delete(&db, first.customer_id).await?, 1);
    assert_eq!(customer::soft_delete(&db, first.customer_id).await?, 0);

    let second = customer::insert(&db, new_customer(&mobile, &email)).await?;
    assert_ne!(first.customer_id, second.customer_id);

    assert_eq!(customer::hard_delete(&db, first.customer_id).await?, 1);
    assert_eq!(customer::hard_delete(&db, second.customer_id).await?, 1);
    assert!(customer::Entity::find_by_id(first.customer_id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn user_soft_delete_sets_status_and_timestamp() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()) };
    let email = format!("{}@example.com", Uuid::new_v4());

    let u = user::create(&db, &email, "Bob", None).await?;
    assert_eq!(user::soft_delete(&db, u.id).await?, 1);
    let found = user::Entity::find_by_id(u.id).one(&db).await?.expect("row kept");
    assert_eq!(found.status, user::STATUS_DELETED);
    assert!(found.deleted_at.is_some());

    user::hard_delete(&db, u.id).await?;
    Ok(())
}
