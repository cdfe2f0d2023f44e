use crate::domain::{CardId, ChartRecord};
use crate::infra::db::Database;
use crate::infra::db::repository::*;

fn record(card_id: impl Into<CardId>, content: &str, stored_at: i64) -> ChartRecord {
    ChartRecord {
        card_id: card_id.into(),
        content: content.to_string(),
        stored_at,
    }
}

#[test]
fn test_chart_repository_roundtrip() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = ChartRepository::new(db.connection());

    let chart = record("card42", r#"{"notes":[1,2,3]}"#, 1_700_000_000_000);
    repo.save(&chart)?;

    assert_eq!(repo.find(&chart.card_id)?, Some(chart.clone()));
    assert_eq!(
        repo.find_content(&chart.card_id)?.as_deref(),
        Some(r#"{"notes":[1,2,3]}"#)
    );
    Ok(())
}

#[test]
fn test_save_replaces_whole_record() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    repo.save(&record(7, "first", 100))?;
    repo.save(&record(7, "second", 200))?;

    let stored = repo.find(&CardId::from(7))?.unwrap();
    assert_eq!(stored.content, "second");
    assert_eq!(stored.stored_at, 200);
    assert_eq!(repo.count()?, 1);
    Ok(())
}

#[test]
fn test_numeric_and_text_keys_are_distinct() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    repo.save(&record(1, "number", 1))?;
    repo.save(&record("1", "text", 2))?;

    assert_eq!(repo.count()?, 2);
    assert_eq!(repo.find_content(&CardId::from(1))?.as_deref(), Some("number"));
    assert_eq!(repo.find_content(&CardId::from("1"))?.as_deref(), Some("text"));

    let numeric = repo.find(&CardId::from(1))?.unwrap();
    assert_eq!(numeric.card_id, CardId::Number(1));
    Ok(())
}

#[test]
fn test_real_keys_roundtrip() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    repo.save(&record(0.25, "quarter", 1))?;
    let stored = repo.find(&CardId::from(0.25))?.unwrap();
    assert_eq!(stored.card_id, CardId::from(0.25));
    assert_eq!(stored.content, "quarter");
    Ok(())
}

#[test]
fn test_find_missing_is_none() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    assert!(repo.find(&CardId::from("nope"))?.is_none());
    assert!(repo.find_content(&CardId::from("nope"))?.is_none());
    Ok(())
}

#[test]
fn test_empty_content_is_kept() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    repo.save(&record("blank", "", 1))?;
    assert_eq!(repo.find_content(&CardId::from("blank"))?, Some(String::new()));
    Ok(())
}

#[test]
fn test_delete_chart() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    repo.save(&record("card1", "{}", 1))?;
    assert_eq!(repo.delete(&CardId::from("card1"))?, 1);
    assert_eq!(repo.delete(&CardId::from("card1"))?, 0);
    assert!(repo.find(&CardId::from("card1"))?.is_none());
    Ok(())
}

#[test]
fn test_clear_removes_everything() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.chart_repo();

    for i in 0..5i64 {
        repo.save(&record(i, "{}", i))?;
    }
    assert_eq!(repo.clear()?, 5);
    assert_eq!(repo.count()?, 0);
    assert_eq!(repo.clear()?, 0);
    Ok(())
}

#[test]
fn test_repositories_share_connection() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let writer = db.chart_repo();
    let reader = ChartRepository::new(db.connection());

    writer.save(&record("shared", "payload", 1))?;
    assert_eq!(
        reader.find_content(&CardId::from("shared"))?.as_deref(),
        Some("payload")
    );
    Ok(())
}
