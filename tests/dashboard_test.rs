mod common;

use anyhow::Result;
use caixa::application::DashboardFilter;
use caixa::domain::Kind;
use common::{draft, seed_basic, test_service};

#[tokio::test]
async fn test_dashboard_empty_store() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let dashboard = service.dashboard(&DashboardFilter::default()).await?;

    assert_eq!(dashboard.totals.income, 0);
    assert_eq!(dashboard.totals.expense, 0);
    assert_eq!(dashboard.totals.profit, 0);
    assert_eq!(dashboard.profit_margin, 0.0);
    assert!(dashboard.by_category.is_empty());
    assert!(dashboard.by_kind.is_empty());
    assert!(dashboard.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dashboard_totals_and_margin() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service.dashboard(&DashboardFilter::default()).await?;

    // income 350.00, expense 75.00
    assert_eq!(dashboard.totals.income, 35000);
    assert_eq!(dashboard.totals.expense, 7500);
    assert_eq!(dashboard.totals.profit, 27500);
    assert!((dashboard.profit_margin - 27500.0 / 35000.0 * 100.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_breakdowns() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service.dashboard(&DashboardFilter::default()).await?;

    let categories: Vec<&str> = dashboard
        .by_category
        .iter()
        .map(|row| row.category.as_str())
        .collect();
    // Bookings 350.00 > Cleaning 45.00 > Fees 30.00
    assert_eq!(categories, vec!["Bookings", "Cleaning", "Fees"]);

    assert_eq!(dashboard.by_kind.len(), 2);
    assert_eq!(dashboard.by_kind[0].kind, Kind::Income);
    assert_eq!(dashboard.by_kind[0].total, 35000);
    assert_eq!(dashboard.by_kind[1].kind, Kind::Expense);
    assert_eq!(dashboard.by_kind[1].total, 7500);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_recent_entries_default_limit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    for day in 1..=12 {
        let date = format!("2024-03-{:02}", day);
        service
            .add_transaction(&draft(&date, "expense", "Fees", "1.00", "paid"))
            .await?;
    }

    let dashboard = service.dashboard(&DashboardFilter::default()).await?;
    assert_eq!(dashboard.entries.len(), 10);
    assert_eq!(dashboard.entries[0].date.to_string(), "2024-03-12");

    let limited = service
        .dashboard(&DashboardFilter {
            limit: Some(3),
            ..Default::default()
        })
        .await?;
    assert_eq!(limited.entries.len(), 3);

    let none = service
        .dashboard(&DashboardFilter {
            limit: Some(0),
            ..Default::default()
        })
        .await?;
    assert!(none.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dashboard_date_range_filter() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            from_date: Some("2024-02-01".into()),
            to_date: Some("2024-02-29".into()),
            ..Default::default()
        })
        .await?;

    assert_eq!(dashboard.entries.len(), 2);
    assert!(dashboard
        .entries
        .iter()
        .all(|tx| tx.date.to_string().starts_with("2024-02")));
    // Aggregates still cover the whole ledger
    assert_eq!(dashboard.totals.income, 35000);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_category_filter() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            category: Some("Bookings".into()),
            ..Default::default()
        })
        .await?;

    assert_eq!(dashboard.entries.len(), 2);
    assert!(dashboard.entries.iter().all(|tx| tx.category == "Bookings"));
    Ok(())
}

#[tokio::test]
async fn test_dashboard_category_all_means_no_filter() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            category: Some("All".into()),
            ..Default::default()
        })
        .await?;

    // "All" disables the filter, so the default recent list is shown
    assert_eq!(dashboard.entries.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_invalid_dates_disable_filter() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            from_date: Some("not-a-date".into()),
            to_date: Some("also-bad".into()),
            ..Default::default()
        })
        .await?;

    // Malformed bounds are dropped, not errors: unfiltered view
    assert_eq!(dashboard.entries.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_inverted_range_matches_nothing() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            from_date: Some("2024-02-01".into()),
            to_date: Some("2024-01-01".into()),
            ..Default::default()
        })
        .await?;

    assert!(dashboard.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dashboard_filtered_entries_newest_first() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;

    let dashboard = service
        .dashboard(&DashboardFilter {
            from_date: Some("2024-01-01".into()),
            ..Default::default()
        })
        .await?;

    let dates: Vec<String> = dashboard
        .entries
        .iter()
        .map(|tx| tx.date.to_string())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    Ok(())
}
