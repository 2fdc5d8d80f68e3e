use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cinescout::catalog::{CatalogService, SignatureTitles, FEATURED_IDS, POPULAR_TERMS};
use cinescout::error::CatalogError;
use cinescout::models::{MediaKind, PageResult, SearchFilters};
use cinescout::omdb::{OmdbApi, RawDetail, RawSummary, SearchPage};
use cinescout::store::CatalogStore;

#[derive(Default)]
struct FakeOmdb {
    search_pages: HashMap<String, SearchPage>,
    details: HashMap<String, RawDetail>,
    fail_searches: HashSet<String>,
    fail_details: HashSet<String>,
    search_calls: Mutex<Vec<(String, u32, SearchFilters)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeOmdb {
    fn queries(&self) -> Vec<String> {
        self.search_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(q, _, _)| q.clone())
            .collect()
    }
}

#[async_trait]
impl OmdbApi for FakeOmdb {
    async fn search(
        &self,
        query: &str,
        page: u32,
        filters: &SearchFilters,
    ) -> Result<SearchPage, CatalogError> {
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), page, filters.clone()));
        if self.fail_searches.contains(query) {
            return Err(CatalogError::Transport("connection reset".to_string()));
        }
        Ok(self
            .search_pages
            .get(query)
            .cloned()
            .unwrap_or_else(|| SearchPage {
                error: Some("Movie not found!".to_string()),
                ..SearchPage::no_results()
            }))
    }

    async fn get_by_id(&self, id: &str) -> Result<RawDetail, CatalogError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        if self.fail_details.contains(id) {
            return Err(CatalogError::Transport("timed out".to_string()));
        }
        Ok(self.details.get(id).cloned().unwrap_or_else(|| RawDetail {
            response: "False".to_string(),
            error: Some("Incorrect IMDb ID.".to_string()),
            ..RawDetail::default()
        }))
    }
}

fn hit(id: &str, title: &str) -> RawSummary {
    RawSummary {
        imdb_id: id.to_string(),
        title: title.to_string(),
        year: "2001".to_string(),
        poster: format!("https://img.example/{id}.jpg"),
        media_type: "movie".to_string(),
    }
}

fn page_of(hits: Vec<RawSummary>, total: &str) -> SearchPage {
    SearchPage {
        results: hits,
        total_results: Some(total.to_string()),
        response: "True".to_string(),
        error: None,
    }
}

fn detail_with_cast(id: &str, title: &str, cast: &str) -> RawDetail {
    RawDetail {
        imdb_id: id.to_string(),
        title: title.to_string(),
        year: "2001".to_string(),
        actors: cast.to_string(),
        media_type: "movie".to_string(),
        response: "True".to_string(),
        ..RawDetail::default()
    }
}

fn service(fake: FakeOmdb) -> (CatalogService, Arc<FakeOmdb>) {
    let api = Arc::new(fake);
    (CatalogService::new(api.clone()), api)
}

#[tokio::test]
async fn empty_query_short_circuits_without_network() {
    let (svc, api) = service(FakeOmdb::default());

    let result = svc.search("   ", 1, &SearchFilters::default()).await.unwrap();

    assert_eq!(result, PageResult::empty());
    assert!(api.search_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pagination_is_derived_from_string_encoded_total() {
    let mut fake = FakeOmdb::default();
    let hits: Vec<RawSummary> = (0..10).map(|i| hit(&format!("tt{i:07}"), "Batman")).collect();
    fake.search_pages
        .insert("Batman".to_string(), page_of(hits, "23"));
    let (svc, _) = service(fake);

    let result = svc
        .search("Batman", 1, &SearchFilters::default())
        .await
        .unwrap();

    assert_eq!(result.items.len(), 10);
    assert_eq!(result.total_results, 23);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.items[0].kind, MediaKind::Movie);
}

#[tokio::test]
async fn provider_no_results_is_an_empty_page_not_an_error() {
    let (svc, _) = service(FakeOmdb::default());

    let result = svc
        .search("zzzzzz", 1, &SearchFilters::default())
        .await
        .unwrap();

    assert_eq!(result.items.len(), 0);
    assert_eq!(result.total_results, 0);
    assert_eq!(result.total_pages, 0);
}

#[tokio::test]
async fn transport_failure_propagates_from_search() {
    let mut fake = FakeOmdb::default();
    fake.fail_searches.insert("Batman".to_string());
    let (svc, _) = service(fake);

    let err = svc
        .search("Batman", 1, &SearchFilters::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn get_by_year_composes_year_and_kind_filters() {
    let (svc, api) = service(FakeOmdb::default());

    svc.get_by_year("1994", 2).await.unwrap();

    let calls = api.search_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (query, page, filters) = &calls[0];
    assert_eq!(query.as_str(), "movie");
    assert_eq!(*page, 2);
    assert_eq!(filters.year.as_deref(), Some("1994"));
    assert_eq!(filters.kind, Some(MediaKind::Movie));
}

#[tokio::test]
async fn get_popular_searches_a_rotation_term_restricted_to_movies() {
    let (svc, api) = service(FakeOmdb::default());

    svc.get_popular(3).await.unwrap();

    let calls = api.search_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (query, page, filters) = &calls[0];
    assert!(
        POPULAR_TERMS.contains(&query.as_str()),
        "popular query must come from the rotation, got '{query}'"
    );
    assert_eq!(*page, 3);
    assert_eq!(filters.kind, Some(MediaKind::Movie));
    assert_eq!(filters.year, None);
}

#[tokio::test]
async fn unknown_id_is_not_found_and_distinct_from_transport() {
    let mut fake = FakeOmdb::default();
    fake.fail_details.insert("tt0000001".to_string());
    let (svc, _) = service(fake);

    let not_found = svc.get_by_id("tt9999999").await.unwrap_err();
    assert!(not_found.is_not_found());

    let transport = svc.get_by_id("tt0000001").await.unwrap_err();
    assert!(!transport.is_not_found());
    assert!(matches!(transport, CatalogError::Transport(_)));
}

#[tokio::test]
async fn get_by_id_returns_normalized_detail() {
    let mut fake = FakeOmdb::default();
    let mut raw = detail_with_cast("tt0111161", "The Shawshank Redemption", "Tim Robbins");
    raw.box_office = "N/A".to_string();
    fake.details.insert("tt0111161".to_string(), raw);
    let (svc, _) = service(fake);

    let detail = svc.get_by_id("tt0111161").await.unwrap();

    assert_eq!(detail.id, "tt0111161");
    assert_eq!(detail.title, "The Shawshank Redemption");
    assert_eq!(detail.box_office, "");
}

#[tokio::test]
async fn featured_shelf_skips_failed_lookups() {
    let mut fake = FakeOmdb::default();
    // Four resolvable ids, one transport failure, one unknown to the provider.
    for id in &FEATURED_IDS[..4] {
        fake.details
            .insert(id.to_string(), detail_with_cast(id, "Classic", "Somebody"));
    }
    fake.fail_details.insert(FEATURED_IDS[4].to_string());
    let (svc, _) = service(fake);

    let shelf = svc.get_featured().await;

    let ids: Vec<&str> = shelf.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, &FEATURED_IDS[..4]);
    assert_eq!(shelf.total_results, 4);
    assert_eq!(shelf.total_pages, 1);
}

#[tokio::test]
async fn actor_search_stops_after_first_strategy_when_it_fills_the_page() {
    let mut fake = FakeOmdb::default();
    let hits: Vec<RawSummary> = (0..12)
        .map(|i| hit(&format!("tt10000{i:02}"), &format!("Movie {i}")))
        .collect();
    for h in &hits {
        fake.details.insert(
            h.imdb_id.clone(),
            detail_with_cast(&h.imdb_id, &h.title, "Tom Hanks, Robin Wright"),
        );
    }
    fake.search_pages
        .insert("Tom Hanks".to_string(), page_of(hits.clone(), "12"));
    let (svc, api) = service(fake);

    let result = svc.search_by_actor("Tom Hanks", 1).await.unwrap();

    assert_eq!(result.items.len(), 10);
    let got: Vec<&str> = result.items.iter().map(|m| m.id.as_str()).collect();
    let want: Vec<&str> = hits[..10].iter().map(|h| h.imdb_id.as_str()).collect();
    assert_eq!(got, want, "strategy-1 provider order must be preserved");
    assert_eq!(api.queries(), vec!["Tom Hanks"]);
}

#[tokio::test]
async fn actor_search_keeps_candidate_when_detail_lookup_fails() {
    let mut fake = FakeOmdb::default();
    let hits = vec![
        hit("tt0000001", "A Match"),
        hit("tt0000002", "Unverifiable"),
        hit("tt0000003", "Unrelated"),
    ];
    fake.search_pages
        .insert("Gary Oldman".to_string(), page_of(hits, "3"));
    fake.details.insert(
        "tt0000001".to_string(),
        detail_with_cast("tt0000001", "A Match", "Gary Oldman, Tim Roth"),
    );
    fake.fail_details.insert("tt0000002".to_string());
    fake.details.insert(
        "tt0000003".to_string(),
        detail_with_cast("tt0000003", "Unrelated", "Somebody Else"),
    );
    let (svc, _) = service(fake);

    let result = svc.search_by_actor("Gary Oldman", 1).await.unwrap();

    let ids: Vec<&str> = result.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt0000001", "tt0000002"]);
}

#[tokio::test]
async fn actor_search_falls_back_through_name_strategies_and_dedupes() {
    let mut fake = FakeOmdb::default();
    // Full-name search misses; surname and first-name searches overlap on "b".
    fake.search_pages.insert(
        "Pine".to_string(),
        page_of(vec![hit("tt000000a", "Film A"), hit("tt000000b", "Film B")], "2"),
    );
    fake.search_pages.insert(
        "Chris".to_string(),
        page_of(vec![hit("tt000000b", "Film B"), hit("tt000000c", "Film C")], "2"),
    );
    for (id, title) in [("tt000000a", "Film A"), ("tt000000b", "Film B"), ("tt000000c", "Film C")] {
        fake.details
            .insert(id.to_string(), detail_with_cast(id, title, "Chris Pine"));
    }
    let (svc, api) = service(fake);

    let result = svc.search_by_actor("Chris Pine", 1).await.unwrap();

    let ids: Vec<&str> = result.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt000000a", "tt000000b", "tt000000c"]);
    assert_eq!(api.queries(), vec!["Chris Pine", "Pine", "Chris"]);
    let detail_calls = api.detail_calls.lock().unwrap();
    assert_eq!(
        detail_calls.iter().filter(|id| *id == "tt000000b").count(),
        1,
        "overlapping candidate must be examined once"
    );
}

#[tokio::test]
async fn actor_search_reaches_signature_title_for_curated_actor() {
    let mut fake = FakeOmdb::default();
    fake.search_pages.insert(
        "Forrest Gump".to_string(),
        page_of(vec![hit("tt0109830", "Forrest Gump")], "1"),
    );
    fake.details.insert(
        "tt0109830".to_string(),
        detail_with_cast("tt0109830", "Forrest Gump", "Tom Hanks, Robin Wright"),
    );
    let api = Arc::new(fake);
    let table: SignatureTitles = [("tom hanks".to_string(), "Forrest Gump".to_string())]
        .into_iter()
        .collect();
    let svc = CatalogService::with_signature_titles(api.clone(), table);

    let result = svc.search_by_actor("Tom Hanks", 1).await.unwrap();

    let ids: Vec<&str> = result.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt0109830"]);
    assert_eq!(api.queries(), vec!["Tom Hanks", "Hanks", "Tom", "Forrest Gump"]);
}

#[tokio::test]
async fn actor_search_matches_reversed_name_order() {
    let mut fake = FakeOmdb::default();
    fake.search_pages.insert(
        "Ken Watanabe".to_string(),
        page_of(vec![hit("tt1234567", "A Credit")], "1"),
    );
    fake.details.insert(
        "tt1234567".to_string(),
        detail_with_cast("tt1234567", "A Credit", "Watanabe Ken, Other People"),
    );
    let (svc, _) = service(fake);

    let result = svc.search_by_actor("Ken Watanabe", 1).await.unwrap();

    assert_eq!(result.items.len(), 1);
}

#[test]
fn store_last_search_write_wins() {
    let mut store = CatalogStore::new();
    let first = PageResult::paged(Vec::new(), 40);
    let second = PageResult::paged(Vec::new(), 7);

    store.begin_search();
    store.apply_search(first);
    store.apply_search(second);

    assert_eq!(store.total_results, 7);
    assert_eq!(store.total_pages, 1);
    assert!(!store.search_loading);
}

#[test]
fn store_failure_then_success_clears_the_error() {
    let mut store = CatalogStore::new();

    store.begin_search();
    store.fail_search("request failed");
    assert_eq!(store.search_error.as_deref(), Some("request failed"));
    assert!(!store.search_loading);

    store.begin_search();
    store.apply_search(PageResult::empty());
    assert!(store.search_error.is_none());
}

#[test]
fn store_clear_search_resets_transient_state() {
    let mut store = CatalogStore::new();
    store.set_query("batman");
    store.apply_search(PageResult::paged(Vec::new(), 23));

    store.clear_search();

    assert_eq!(store, CatalogStore::new());
}
