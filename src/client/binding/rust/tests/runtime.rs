/* src/client/binding/rust/tests/runtime.rs */

use gig_binding::{
  Content, DynamicContentPage, FaqEntry, PageMeta, SeoHead, SiteConfig, SiteRuntime, SyncOutcome,
  UrlStrategy,
};
use gig_head::{DocumentHead, HeadDocument, NodeKey, render_head};
use gig_locale::{Currency, Locale, LocaleStore, MemoryStore};

fn site() -> SiteConfig {
  SiteConfig {
    name: "Gigmarket".into(),
    base_url: "https://gigmarket.example".into(),
    url_strategy: UrlStrategy::Prefix,
    ..Default::default()
  }
}

fn runtime(signals: &[&str]) -> SiteRuntime<MemoryStore, HeadDocument> {
  let store = LocaleStore::initialize(MemoryStore::new(), signals.iter().copied());
  SiteRuntime::new(site(), store, HeadDocument::new()).unwrap()
}

fn content() -> Content {
  Content {
    slug: Some("logo-design".into()),
    title: "Logo design".into(),
    description: "Hire logo designers".into(),
    keywords: vec!["logo".into()],
    url: "/ai/logo-design".into(),
    faq: vec![FaqEntry { question: "Cost?".into(), answer: "From $50.".into() }],
    generated_at: Some("2026-03-01T10:00:00Z".into()),
    ..Default::default()
  }
}

fn hreflang_urls(doc: &HeadDocument) -> Vec<String> {
  doc
    .elements()
    .iter()
    .filter(|e| e.attr("rel") == Some("alternate"))
    .filter_map(|e| e.attr("href").map(String::from))
    .collect()
}

#[test]
fn locale_change_reapplies_each_view_once() {
  let mut rt = runtime(&["en-US"]);
  let (head, _) = rt.mount(SeoHead, PageMeta { path: "/ai/logo-design".into(), ..Default::default() });
  let (page, outcome) = rt.mount(DynamicContentPage, None);
  assert_eq!(outcome, SyncOutcome::Pending);

  let outcome = rt.set_input::<DynamicContentPage>(page, Some(content())).unwrap();
  assert!(matches!(outcome, SyncOutcome::Applied(_)));
  // same content again is not a change
  assert_eq!(
    rt.set_input::<DynamicContentPage>(page, Some(content())).unwrap(),
    SyncOutcome::Unchanged
  );

  assert_eq!(rt.set_locale(Locale::ZhTw), 2);
  assert_eq!(rt.applies(head), Ok(2));
  assert_eq!(rt.applies(page), Ok(2));

  // setting the same locale is no change at all
  assert_eq!(rt.set_locale(Locale::ZhTw), 0);
  assert_eq!(rt.applies(head), Ok(2));

  let doc = rt.document();
  assert_eq!(doc.lang().as_deref(), Some("zh-TW"));
  assert_eq!(
    doc.value_of(&NodeKey::Canonical).as_deref(),
    Some("https://gigmarket.example/zh-TW/ai/logo-design")
  );
  assert_eq!(doc.value_of(&NodeKey::meta_property("og:locale")).as_deref(), Some("zh_TW"));
  assert_eq!(doc.count(&NodeKey::json_ld("ld-faq")), 1);
  assert_eq!(doc.count(&NodeKey::alternate("x-default")), 1);
  assert_eq!(hreflang_urls(doc).len(), 4);
}

#[test]
fn end_to_end_preferences_and_head() {
  let mut rt = runtime(&["zh-TW"]);
  let prefs = rt.store().preference();
  assert_eq!(prefs.locale, Locale::ZhTw);
  assert_eq!(prefs.currency, Currency::Twd);
  assert!(!prefs.currency_manually_set);

  let (page, _) = rt.mount(DynamicContentPage, Some(content()));
  assert_eq!(rt.document().title().as_deref(), Some("Logo design | Gigmarket"));

  // currency does not feed any intent
  assert_eq!(rt.set_currency(Currency::Usd), 0);
  assert!(rt.store().currency_manually_set());

  assert_eq!(rt.set_locale(Locale::En), 1);
  assert_eq!(rt.currency(), Currency::Usd);
  assert_eq!(rt.set_locale(Locale::ZhCn), 1);
  assert_eq!(rt.currency(), Currency::Usd);
  assert_eq!(rt.applies(page), Ok(3));

  let entries = rt.store().storage().entries();
  assert_eq!(entries.get("preferred-language").map(String::as_str), Some("zh-CN"));
  assert_eq!(entries.get("preferred-currency").map(String::as_str), Some("USD"));

  let html = render_head(rt.document());
  assert_eq!(html.matches("application/ld+json").count(), 3);
  assert!(html.contains(r#"<meta name="geo.region" content="CN">"#));

  rt.unmount(page).unwrap();
  let doc = rt.document();
  assert_eq!(doc.count(&NodeKey::json_ld("ld-article")), 0);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-faq")), 0);
  assert!(hreflang_urls(doc).is_empty());
  // shared singletons stay for the next view
  assert_eq!(doc.count(&NodeKey::Canonical), 1);
  assert_eq!(doc.title().as_deref(), Some("Logo design | Gigmarket"));
}

#[test]
fn reset_clears_manual_currency_and_resyncs() {
  let mut rt = runtime(&["en"]);
  let (head, _) = rt.mount(SeoHead, PageMeta::default());
  rt.set_currency(Currency::Twd);
  assert_eq!(rt.reset(["zh-CN"]), 1);
  assert_eq!(rt.locale(), Locale::ZhCn);
  assert_eq!(rt.currency(), Currency::Cny);
  assert!(!rt.store().currency_manually_set());
  assert_eq!(rt.applies(head), Ok(2));
}

#[test]
fn views_share_singletons_without_duplicates() {
  let mut rt = runtime(&["en"]);
  let (head, _) = rt.mount(SeoHead, PageMeta::default());
  let (page, _) = rt.mount(DynamicContentPage, Some(content()));
  rt.set_locale(Locale::ZhCn);

  let doc = rt.document();
  assert_eq!(doc.count(&NodeKey::Canonical), 1);
  assert_eq!(doc.count(&NodeKey::meta_name("description")), 1);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-organization")), 1);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-article")), 1);

  rt.unmount(head).unwrap();
  assert_eq!(rt.document().count(&NodeKey::json_ld("ld-organization")), 0);
  assert_eq!(rt.document().count(&NodeKey::json_ld("ld-article")), 1);
  // hreflang links are claimed by the page too
  assert_eq!(rt.document().count(&NodeKey::alternate("en")), 1);
  rt.unmount(page).unwrap();
  assert_eq!(rt.view_count(), 0);
}

#[test]
fn clearing_content_withdraws_the_page_head() {
  let mut rt = runtime(&["en"]);
  let (page, _) = rt.mount(DynamicContentPage, Some(content()));
  assert_eq!(rt.document().count(&NodeKey::json_ld("ld-article")), 1);

  // slug changed, next content still loading
  let outcome = rt.set_input::<DynamicContentPage>(page, None).unwrap();
  assert_eq!(outcome, SyncOutcome::Pending);
  let doc = rt.document();
  assert_eq!(doc.count(&NodeKey::json_ld("ld-article")), 0);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-faq")), 0);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-breadcrumb")), 0);
  assert!(hreflang_urls(doc).is_empty());

  // locale changes while pending publish nothing
  assert_eq!(rt.set_locale(Locale::ZhTw), 0);
  assert_eq!(rt.document().count(&NodeKey::json_ld("ld-article")), 0);

  let outcome = rt.set_input::<DynamicContentPage>(page, Some(content())).unwrap();
  assert!(matches!(outcome, SyncOutcome::Applied(_)));
  assert_eq!(rt.document().count(&NodeKey::json_ld("ld-article")), 1);
  assert_eq!(rt.applies(page), Ok(2));
}

#[test]
fn unmounting_the_page_hands_hreflang_back_to_the_head() {
  let mut rt = runtime(&["en"]);
  let (head, _) = rt.mount(SeoHead, PageMeta { path: "/".into(), ..Default::default() });
  let (page, _) = rt.mount(DynamicContentPage, Some(content()));
  let en = NodeKey::alternate("en");
  assert_eq!(
    rt.document().value_of(&en).as_deref(),
    Some("https://gigmarket.example/ai/logo-design")
  );

  rt.unmount(page).unwrap();
  let doc = rt.document();
  assert_eq!(doc.count(&en), 1);
  assert_eq!(doc.value_of(&en).as_deref(), Some("https://gigmarket.example/"));
  assert_eq!(
    doc.value_of(&NodeKey::alternate("zh-TW")).as_deref(),
    Some("https://gigmarket.example/zh-TW")
  );
  assert_eq!(doc.count(&NodeKey::json_ld("ld-article")), 0);
  assert_eq!(doc.count(&NodeKey::json_ld("ld-organization")), 1);

  rt.unmount(head).unwrap();
  assert!(hreflang_urls(rt.document()).is_empty());
}
