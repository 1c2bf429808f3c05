//! Content resolution tests against a local mock player

use std::sync::Arc;

use mockito::Matcher;
use url::Url;

use bluos_sdk::{BluChannel, BrowseError, MusicBrowser};

async fn browser_for(server: &mockito::ServerGuard) -> MusicBrowser {
    let channel = Arc::new(BluChannel::new(Url::parse(&server.url()).unwrap()).unwrap());
    MusicBrowser::browse(channel).await.unwrap()
}

fn mock_root(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/Browse")
        .match_query(Matcher::Missing)
        .with_body(body.to_string())
}

fn mock_key(server: &mut mockito::ServerGuard, key: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/Browse")
        .match_query(Matcher::UrlEncoded("key".into(), key.into()))
        .with_body(body.to_string())
}

#[tokio::test]
async fn root_lists_music_sources() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse sid="1">
             <item browseKey="LocalMusic:" text="Library" type="menu"/>
             <item browseKey="TuneIn:" text="TuneIn" type="menu"/>
           </browse>"#,
    )
    .create_async()
    .await;

    let browser = browser_for(&server).await;
    let names: Vec<_> = browser.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Library", "TuneIn"]);
    assert!(browser.entries().iter().all(|e| e.is_resolvable()));
    assert!(!browser.has_next());
}

#[tokio::test]
async fn resolving_an_entry_fetches_its_listing() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse><item browseKey="LocalMusic:" text="Library"/></browse>"#,
    )
    .create_async()
    .await;
    mock_key(
        &mut server,
        "LocalMusic:",
        r#"<browse>
             <item browseKey="LocalMusic:albums" text="Albums"/>
             <item browseKey="LocalMusic:artists" text="Artists"/>
           </browse>"#,
    )
    .create_async()
    .await;

    let browser = browser_for(&server).await;
    let library = browser.resolve(&browser.entries()[0]).await.unwrap();
    assert_eq!(library.key(), Some("LocalMusic:"));
    assert_eq!(library.entries().len(), 2);
    assert_eq!(library.entries()[0].name(), "Albums");
}

#[tokio::test]
async fn unresolvable_entries_are_rejected_locally() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse><item text="Now Playing"/></browse>"#,
    )
    .create_async()
    .await;

    let browser = browser_for(&server).await;
    let leaf = &browser.entries()[0];
    assert!(!leaf.is_resolvable());
    match browser.resolve(leaf).await {
        Err(BrowseError::NotResolvable(name)) => assert_eq!(name, "Now Playing"),
        other => panic!("expected NotResolvable, got {other:?}"),
    }
}

#[tokio::test]
async fn device_rejection_surfaces_as_remote_error() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse><item browseKey="Stale:" text="Stale"/></browse>"#,
    )
    .create_async()
    .await;
    server
        .mock("GET", "/Browse")
        .match_query(Matcher::UrlEncoded("key".into(), "Stale:".into()))
        .with_status(400)
        .with_body("<error>Invalid browse key</error>")
        .create_async()
        .await;

    let browser = browser_for(&server).await;
    match browser.resolve(&browser.entries()[0]).await {
        Err(BrowseError::Channel(err)) => {
            assert!(err.to_string().contains("Invalid browse key"));
        }
        other => panic!("expected Channel error, got {other:?}"),
    }
}

#[tokio::test]
async fn pagination_cursor_advances_forward_only() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse nextKey="root?page=2">
             <item browseKey="a:" text="Page one entry"/>
           </browse>"#,
    )
    .create_async()
    .await;
    mock_key(
        &mut server,
        "root?page=2",
        r#"<browse><item browseKey="b:" text="Page two entry"/></browse>"#,
    )
    .create_async()
    .await;

    let browser = browser_for(&server).await;
    assert!(browser.has_next());

    let page_two = browser.resolve_next().await.unwrap();
    assert_eq!(page_two.entries()[0].name(), "Page two entry");
    assert!(!page_two.has_next());

    // The last page has no cursor, and the failure is stable
    for _ in 0..2 {
        assert!(matches!(
            page_two.resolve_next().await,
            Err(BrowseError::NoMoreEntries)
        ));
    }
}

#[tokio::test]
async fn search_returns_an_independent_root() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse><item browseKey="LocalMusic:" text="Library"/></browse>"#,
    )
    .create_async()
    .await;
    mock_key(
        &mut server,
        "LocalMusic:",
        r#"<browse><item browseKey="LocalMusic:albums" text="Albums"/></browse>"#,
    )
    .create_async()
    .await;
    server
        .mock("GET", "/Browse")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "LocalMusic:".into()),
            Matcher::UrlEncoded("q".into(), "blue".into()),
        ]))
        .with_body(
            r#"<browse>
                 <item browseKey="LocalMusic:album:1" text="Kind of Blue"/>
                 <item browseKey="LocalMusic:album:2" text="Blue Train"/>
               </browse>"#,
        )
        .create_async()
        .await;

    let browser = browser_for(&server).await;
    let library = browser.resolve(&browser.entries()[0]).await.unwrap();
    let results = library.search("blue").await.unwrap();

    // Results replace, never extend, the searched node's entries
    assert_eq!(results.entries().len(), 2);
    assert_eq!(library.entries().len(), 1);
    assert_eq!(results.entries()[0].name(), "Kind of Blue");
    assert_eq!(library.entries()[0].name(), "Albums");
}

#[tokio::test]
async fn traversal_stops_at_the_depth_cap() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse>
             <item browseKey="a:" text="Branch"/>
             <item text="Leaf"/>
           </browse>"#,
    )
    .create_async()
    .await;
    mock_key(
        &mut server,
        "a:",
        r#"<browse><item browseKey="b:" text="Deeper branch"/></browse>"#,
    )
    .create_async()
    .await;
    // The level below the cap must never be fetched
    let too_deep = mock_key(&mut server, "b:", "<browse/>")
        .expect(0)
        .create_async()
        .await;

    let browser = browser_for(&server).await;
    let mut visited = Vec::new();
    browser
        .visit_entries(2, &mut |level, entry| {
            visited.push((level, entry.name().to_string()));
        })
        .await
        .unwrap();

    assert_eq!(
        visited,
        vec![
            (0, "Branch".to_string()),
            (1, "Deeper branch".to_string()),
            (0, "Leaf".to_string()),
        ]
    );
    too_deep.assert_async().await;
}

#[tokio::test]
async fn zero_depth_traversal_visits_nothing() {
    let mut server = mockito::Server::new_async().await;
    mock_root(
        &mut server,
        r#"<browse><item browseKey="a:" text="Branch"/></browse>"#,
    )
    .create_async()
    .await;

    let browser = browser_for(&server).await;
    let mut count = 0usize;
    browser
        .visit_entries(0, &mut |_, _| count += 1)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
