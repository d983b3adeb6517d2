//! Generation and matching through the site-aware router.

use std::collections::BTreeSet;

use site_router::routing::{
    FixedSite, GenerateError, LOCALE_PARAM, Parameters, ReferenceType, RouteCollection,
    RouteDefinition, Site, SiteAwareRouter, SiteMap, SiteResolver,
};
use url::Url;

fn shop_router() -> SiteAwareRouter {
    let routes: RouteCollection = [
        ("entropy_event_shop.fi", "/{year}/{slug}/kauppa"),
        ("entropy_event_shop.en", "/en/{year}/{slug}/shop"),
        ("events.fi", "/tapahtumat"),
        ("events.en", "/en/events"),
        ("alpha.internal", "/internal/alpha"),
    ]
    .into_iter()
    .map(|(name, path)| RouteDefinition::new(name, path).unwrap())
    .collect();

    let sites = SiteMap::new(
        vec![
            Site {
                locale: "fi".into(),
                path_prefix: String::new(),
                base_url: Some(Url::parse("https://entropy.fi").unwrap()),
            },
            Site {
                locale: "en".into(),
                path_prefix: "/en".into(),
                base_url: Some(Url::parse("https://entropy.fi").unwrap()),
            },
        ],
        "fi",
    );
    let allowed: BTreeSet<String> = ["fi", "en"].into_iter().map(String::from).collect();
    SiteAwareRouter::new(routes, Some(allowed), sites)
}

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_generate_defaults_to_current_site() {
    let router = shop_router();
    let p = params(&[("year", "2025"), ("slug", "shop-event")]);

    assert_eq!(
        router.generate("entropy_event_shop", &p).unwrap(),
        "/2025/shop-event/kauppa"
    );
}

#[test]
fn test_generate_with_explicit_locale() {
    let router = shop_router();
    let p = params(&[("year", "2025"), ("slug", "shop-event"), (LOCALE_PARAM, "en")]);

    assert_eq!(
        router.generate("entropy_event_shop", &p).unwrap(),
        "/en/2025/shop-event/shop"
    );
}

#[test]
fn test_explicit_locale_overrides_current_site() {
    let router = shop_router();
    let en = FixedSite("en".into());
    let p = params(&[("year", "2025"), ("slug", "shop-event"), (LOCALE_PARAM, "fi")]);

    let url = router
        .generate_for(&en, "entropy_event_shop", &p, ReferenceType::AbsolutePath)
        .unwrap();
    assert_eq!(url, "/2025/shop-event/kauppa");
}

#[test]
fn test_current_site_supplies_locale() {
    let router = shop_router();
    let en = FixedSite("en".into());
    let p = params(&[("year", "2025"), ("slug", "shop-event")]);

    let url = router
        .generate_for(&en, "entropy_event_shop", &p, ReferenceType::AbsolutePath)
        .unwrap();
    assert_eq!(url, "/en/2025/shop-event/shop");
}

#[test]
fn test_full_name_generates_like_base_name() {
    let router = shop_router();
    let by_base = params(&[("year", "2025"), ("slug", "shop-event"), (LOCALE_PARAM, "fi")]);
    let by_full = params(&[("year", "2025"), ("slug", "shop-event")]);

    assert_eq!(
        router.generate("entropy_event_shop.fi", &by_full).unwrap(),
        router.generate("entropy_event_shop", &by_base).unwrap()
    );
}

#[test]
fn test_generate_does_not_mutate_parameters() {
    let router = shop_router();
    let p = params(&[("year", "2025"), ("slug", "shop-event"), (LOCALE_PARAM, "en")]);
    let before = p.clone();

    router.generate("entropy_event_shop", &p).unwrap();
    assert_eq!(p, before);
}

#[test]
fn test_unknown_route_is_error() {
    let router = shop_router();
    let err = router.generate("no_such_route", &Parameters::new()).unwrap_err();
    assert!(matches!(err, GenerateError::RouteNotFound(ref name) if name == "no_such_route"));
    assert!(err.is_not_found());
}

#[test]
fn test_missing_parameters_reported() {
    let router = shop_router();
    let err = router
        .generate("entropy_event_shop", &params(&[("year", "2025")]))
        .unwrap_err();
    assert!(matches!(err, GenerateError::MissingParameters { ref params, .. } if params == &["slug".to_string()]));
}

#[test]
fn test_absolute_url() {
    let router = shop_router();
    let p = params(&[("year", "2025"), ("slug", "shop-event"), (LOCALE_PARAM, "en")]);

    let url = router
        .generate_for(router.sites(), "entropy_event_shop", &p, ReferenceType::AbsoluteUrl)
        .unwrap();
    assert_eq!(url, "https://entropy.fi/en/2025/shop-event/shop");
}

#[test]
fn test_match_in_own_locale() {
    let router = shop_router();

    let fi = router.match_path("/2025/shop-event/kauppa").unwrap();
    assert_eq!(fi.route, "entropy_event_shop.fi");
    assert_eq!(fi.base.as_deref(), Some("entropy_event_shop"));
    assert_eq!(fi.locale, "fi");
    assert_eq!(fi.params.get("year").map(String::as_str), Some("2025"));
    assert_eq!(fi.params.get("slug").map(String::as_str), Some("shop-event"));

    let en = router.match_path("/en/2025/shop-event/shop").unwrap();
    assert_eq!(en.route, "entropy_event_shop.en");
    assert_eq!(en.locale, "en");
}

#[test]
fn test_english_shape_under_finnish_site_is_not_found() {
    let router = shop_router();
    assert_eq!(router.sites().locale_for_path("/2025/shop-event/shop"), "fi");
    assert!(router.match_path("/2025/shop-event/shop").is_none());
}

#[test]
fn test_finnish_shape_under_english_site_is_not_found() {
    let router = shop_router();
    assert!(router.match_path("/en/tapahtumat").is_none());
    assert!(router.match_path("/en/2025/shop-event/kauppa").is_none());
}

#[test]
fn test_neutral_route_matches_under_every_site() {
    let router = shop_router();

    let matched = router.match_path("/internal/alpha").unwrap();
    assert_eq!(matched.route, "alpha.internal");
    assert_eq!(matched.base, None);
    assert_eq!(matched.locale, "fi");
}

#[test]
fn test_alternates_for_match() {
    let router = shop_router();
    let matched = router.match_path("/2025/shop-event/kauppa").unwrap();

    let alternates = router.alternates(&matched);
    assert_eq!(alternates.len(), 1);
    assert_eq!(
        alternates.get("en").map(String::as_str),
        Some("/en/2025/shop-event/shop")
    );
}
