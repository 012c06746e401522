use chrono::{Duration, TimeZone, Utc};
use wedding_content::content::images::{GcpConfig, ImageEnv, ImageResolver};
use wedding_content::content::timeline::{self, PROGRESS_END_SECS, PROGRESS_START_SECS};
use wedding_content::AppConfig;

#[test]
fn test_every_local_key_resolves_under_production() {
    let gcp = GcpConfig::default();
    let local = ImageResolver::for_env(ImageEnv::Local, &gcp);
    let production = ImageResolver::for_env(ImageEnv::Production, &gcp);

    for key in local.keys() {
        let filename = local.filename(key).unwrap();
        assert_eq!(
            production.resolve(key).unwrap(),
            format!("https://storage.googleapis.com/{}/{}", gcp.bucket_name, filename)
        );
    }
}

#[test]
fn test_resolve_all_matches_resolve() {
    let config = AppConfig::default();
    let resolver = config.image_resolver();

    let all = resolver.resolve_all();
    assert_eq!(all.len(), resolver.keys().count());
    for (key, url) in &all {
        assert_eq!(resolver.resolve(key).as_ref(), Some(url));
    }
}

#[test]
fn test_timeline_lookup_and_flatten() {
    let entries = timeline::all();
    assert_eq!(entries.len(), 6);

    for entry in entries {
        let found = timeline::by_id(entry.id).unwrap();
        assert_eq!(found.title, entry.title);
    }
    assert!(timeline::by_id(42).is_none());

    let images = timeline::all_images();
    let total: usize = entries.iter().map(|e| e.images.len()).sum();
    assert_eq!(images.len(), total);
    for image in &images {
        assert!(image.timeline_item.images.contains(image.image));
    }
}

#[test]
fn test_only_proposal_has_video() {
    let with_video: Vec<u32> = timeline::all()
        .iter()
        .filter(|e| e.video.is_some())
        .map(|e| e.id)
        .collect();
    assert_eq!(with_video, vec![3]);

    let json = serde_json::to_value(timeline::by_id(1).unwrap()).unwrap();
    assert!(json.get("video").is_none());
}

#[test]
fn test_format_date_present() {
    assert_eq!(timeline::format_date(2025, "Present"), "Present 2025");
}

#[test]
fn test_progress_bounds_and_monotonicity() {
    let start = Utc.timestamp_opt(PROGRESS_START_SECS, 0).unwrap();
    let end = Utc.timestamp_opt(PROGRESS_END_SECS, 0).unwrap();

    assert_eq!(timeline::progress_at(start), 0.0);
    assert_eq!(timeline::progress_at(end), 1.0);

    let mut previous = 0.0;
    let mut t = start;
    while t <= end {
        let p = timeline::progress_at(t);
        assert!(p >= previous);
        previous = p;
        t += Duration::days(97);
    }

    // 婚禮已過，目前進度應為 1
    assert_eq!(timeline::current_progress(), 1.0);
}
