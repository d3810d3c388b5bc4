mod helpers;

use chrono::Duration;

use relay_pagination::{relational::*, *};

use helpers::*;

#[tokio::test]
async fn pages_newest_first() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(100));

    let first = paginator.list_items(Arguments::forward(3)).await?;
    assert_eq!(names(&first), item_names(0..3));
    assert!(!first.page_info.has_previous_page);
    assert!(first.page_info.has_next_page);

    let end_cursor = first.page_info.end_cursor.clone().unwrap();
    let second = paginator
        .list_items(Arguments::forward(3).after(end_cursor))
        .await?;
    assert_eq!(names(&second), item_names(3..6));
    assert!(second.page_info.has_previous_page);
    assert!(second.page_info.has_next_page);

    let last = paginator.list_items(Arguments::backward(3)).await?;
    assert_eq!(names(&last), item_names(97..100));
    assert!(last.page_info.has_previous_page);
    assert!(!last.page_info.has_next_page);
    Ok(())
}

#[tokio::test]
async fn forward_and_backward_agree_on_order() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(30));

    let forward = paginator.list_items(Arguments::forward(10)).await?;
    let before = paginator
        .list_items(Arguments::forward(1).after(forward.page_info.end_cursor.clone().unwrap()))
        .await?;
    let backward = paginator
        .list_items(Arguments::backward(10).before(before.items[0].cursor.clone()))
        .await?;
    assert_eq!(names(&backward), names(&forward));
    assert_eq!(backward.page_info.start_cursor, forward.page_info.start_cursor);
    assert_eq!(backward.page_info.end_cursor, forward.page_info.end_cursor);

    let backward_pages = walk_backward(&paginator, 10).await?;
    assert_eq!(
        backward_pages,
        vec![item_names(0..10), item_names(10..20), item_names(20..30)]
    );
    Ok(())
}

#[tokio::test]
async fn page_starts_next_to_the_cursor() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(20));
    let all = paginator.list_items(Arguments::forward(20)).await?;
    let cursor = all.items[10].cursor.clone();

    let after = paginator
        .list_items(Arguments::forward(2).after(cursor.clone()))
        .await?;
    assert_eq!(names(&after), item_names(11..13));

    let before = paginator
        .list_items(Arguments::backward(2).before(cursor))
        .await?;
    assert_eq!(names(&before), item_names(8..10));
    assert!(before.page_info.has_next_page);
    assert!(before.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn zero_sized_pages_report_neighbours() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(10));
    let all = paginator.list_items(Arguments::forward(10)).await?;

    let middle = all.items[5].cursor.clone();
    let page = paginator
        .list_items(Arguments::forward(0).after(middle.clone()))
        .await?;
    assert!(page.is_empty());
    assert!(page.page_info.has_previous_page);
    assert!(page.page_info.has_next_page);
    assert_eq!(page.page_info.end_cursor, None);

    let page = paginator
        .list_items(Arguments::backward(0).before(middle))
        .await?;
    assert!(page.is_empty());
    assert!(page.page_info.has_previous_page);
    assert!(page.page_info.has_next_page);

    let oldest = all.page_info.end_cursor.clone().unwrap();
    let page = paginator
        .list_items(Arguments::forward(0).after(oldest))
        .await?;
    assert!(page.page_info.has_previous_page);
    assert!(!page.page_info.has_next_page);

    let newest = all.page_info.start_cursor.clone().unwrap();
    let page = paginator
        .list_items(Arguments::backward(3).before(newest))
        .await?;
    assert!(page.is_empty());
    assert!(!page.page_info.has_previous_page);
    assert!(page.page_info.has_next_page);
    Ok(())
}

#[tokio::test]
async fn walk_visits_every_row_once() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(47));
    for page_size in [1, 5, 10, 47, 100] {
        let visited = walk_forward(&paginator, page_size).await?;
        assert_eq!(visited, item_names(0..47), "page size {page_size}");
    }
    Ok(())
}

#[tokio::test]
async fn rows_sharing_a_timestamp_are_not_skipped() -> anyhow::Result<()> {
    let mut events = test_events(3);
    let instant = epoch() - Duration::seconds(10);
    for i in 3..9 {
        events.push(Event {
            id: format!("tied-{i}"),
            name: format!("item{i}"),
            created_at: instant,
        });
    }
    let paginator = relational_paginator(events);

    let mut visited = walk_forward(&paginator, 2).await?;
    assert_eq!(visited.len(), 9);
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), 9);
    Ok(())
}

#[tokio::test]
async fn concurrent_inserts_do_not_disturb_an_unchanged_range() -> anyhow::Result<()> {
    let table = MemoryTable::with_events(test_events(10));
    let paginator = RelationalPaginator::new(table.clone(), event_key);

    let first = paginator.list_items(Arguments::forward(5)).await?;
    assert!(!first.page_info.has_previous_page);

    table
        .insert(Event {
            id: "late".to_string(),
            name: "newest".to_string(),
            created_at: epoch() + Duration::seconds(1),
        })
        .await;

    let second = paginator
        .list_items(Arguments::forward(5).after(first.page_info.end_cursor.clone().unwrap()))
        .await?;
    assert_eq!(names(&second), item_names(5..10));

    // the first page now has a newer neighbour
    let again = paginator
        .list_items(Arguments::backward(5).before(second.items[0].cursor.clone()))
        .await?;
    assert_eq!(names(&again), item_names(0..5));
    assert!(again.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn rejects_malformed_cursors() -> anyhow::Result<()> {
    let paginator = relational_paginator(test_events(5));
    let res = paginator
        .list_items(Arguments::forward(2).after("definitely not a cursor"))
        .await;
    assert!(matches!(res, Err(PaginationError::InvalidCursor(_))));

    let score_cursor = ScoreCursor::new(1.0).encode_cursor();
    let res = paginator
        .list_items(Arguments::backward(2).before(score_cursor))
        .await;
    assert!(matches!(
        res,
        Err(PaginationError::InvalidCursor(CursorError::MissingSeparator))
    ));
    Ok(())
}

#[tokio::test]
async fn reports_total_count_when_configured() -> anyhow::Result<()> {
    let config = PaginatorConfig::builder()
        .include_total_count(true)
        .build()?;
    let paginator =
        RelationalPaginator::with_config(MemoryTable::with_events(test_events(12)), event_key, config);
    let page = paginator.list_items(Arguments::backward(4)).await?;
    assert_eq!(page.page_info.total_count, Some(12));
    Ok(())
}

#[tokio::test]
async fn usable_as_trait_object() -> anyhow::Result<()> {
    let paginator: Box<dyn Paginator<Event>> = Box::new(relational_paginator(test_events(4)));
    let page = paginator.list_items(Arguments::default()).await?;
    assert_eq!(names(&page), item_names(0..4));
    assert!(!page.page_info.has_next_page);
    Ok(())
}
