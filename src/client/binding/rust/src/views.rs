/* src/client/binding/rust/src/views.rs */

//! Views that compute a [`MetadataIntent`] from site settings, the current
//! locale and their own input.

use gig_head::{GeoTags, MetadataIntent, OpenGraph, StructuredDataBlock, TwitterCard};
use gig_locale::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::content::Content;
use crate::site::SiteConfig;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// A mounted thing that contributes metadata to the head.
pub trait ContentView {
  /// Everything besides the locale the intent depends on. Equality decides
  /// whether a new input counts as a change.
  type Input: Clone + PartialEq;

  /// `None` while the view has nothing to publish yet.
  fn intent(&self, site: &SiteConfig, locale: Locale, input: &Self::Input)
  -> Option<MetadataIntent>;
}

/// Per-page values for the site-wide SEO head.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
  pub title: Option<String>,
  pub description: Option<String>,
  pub keywords: Vec<String>,
  /// Site-relative path, e.g. `/services/logo-design`.
  pub path: String,
  pub image: Option<String>,
  pub og_type: Option<String>,
  pub noindex: bool,
}

/// The generic head every page mounts: page title and description plus the
/// site's Organization and WebSite blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoHead;

impl ContentView for SeoHead {
  type Input = PageMeta;

  fn intent(&self, site: &SiteConfig, locale: Locale, page: &PageMeta) -> Option<MetadataIntent> {
    let site_name = site.site_name(locale);
    let title = match (&page.title, site.tagline(locale)) {
      (Some(title), _) => format!("{title} | {site_name}"),
      (None, Some(tagline)) => format!("{site_name} | {tagline}"),
      (None, None) => site_name.to_string(),
    };
    let summary = PageSummary {
      path: &page.path,
      title,
      headline: page.title.clone().unwrap_or_else(|| site_name.to_string()),
      description: page.description.clone().or_else(|| site.description(locale).map(String::from)),
      keywords: &page.keywords,
      image: page.image.as_deref(),
      og_type: page.og_type.as_deref().unwrap_or("website"),
      noindex: page.noindex,
      modified_time: None,
    };
    let mut intent = base_intent(site, locale, &summary);

    let base = site.base_url.trim_end_matches('/');
    let mut organization = json!({
      "@context": SCHEMA_CONTEXT,
      "@type": "Organization",
      "name": site_name,
      "url": base,
    });
    if let Some(logo) = &site.default_image {
      organization["logo"] = Value::String(logo.clone());
    }
    intent.structured_data.push(StructuredDataBlock::new("ld-organization", organization));
    intent.structured_data.push(StructuredDataBlock::new(
      "ld-website",
      json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site_name,
        "url": site.localized_url("/", locale),
        "inLanguage": locale.as_str(),
      }),
    ));
    Some(intent)
  }
}

/// A page rendering generated content fetched from the backend. The input is
/// `None` until the fetch resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicContentPage;

impl ContentView for DynamicContentPage {
  type Input = Option<Content>;

  fn intent(
    &self,
    site: &SiteConfig,
    locale: Locale,
    content: &Option<Content>,
  ) -> Option<MetadataIntent> {
    let content = content.as_ref()?;
    let path = match (content.url.is_empty(), &content.slug) {
      (true, Some(slug)) => format!("/{slug}"),
      _ => site.path_of(&content.url),
    };
    let site_name = site.site_name(locale);
    let summary = PageSummary {
      path: &path,
      title: format!("{} | {site_name}", content.title),
      headline: content.title.clone(),
      description: Some(content.description.clone()).filter(|d| !d.is_empty()),
      keywords: &content.keywords,
      image: content.image.as_deref(),
      og_type: "article",
      noindex: false,
      modified_time: content.generated_at.as_deref(),
    };
    let mut intent = base_intent(site, locale, &summary);
    let url = site.localized_url(&path, locale);

    let mut article = json!({
      "@context": SCHEMA_CONTEXT,
      "@type": "Article",
      "headline": content.title,
      "inLanguage": locale.as_str(),
      "url": url,
      "publisher": { "@type": "Organization", "name": site_name },
    });
    if let Some(description) = summary.description.as_deref() {
      article["description"] = Value::String(description.to_string());
    }
    if !content.keywords.is_empty() {
      article["keywords"] = Value::String(content.keywords.join(", "));
    }
    if let Some(generated_at) = &content.generated_at {
      article["dateModified"] = Value::String(generated_at.clone());
    }
    if let Some(image) = summary.image.or(site.default_image.as_deref()) {
      article["image"] = Value::String(image.to_string());
    }
    intent.structured_data.push(StructuredDataBlock::new("ld-article", article));

    if !content.faq.is_empty() {
      let questions: Vec<Value> = content
        .faq
        .iter()
        .map(|entry| {
          json!({
            "@type": "Question",
            "name": entry.question,
            "acceptedAnswer": { "@type": "Answer", "text": entry.answer },
          })
        })
        .collect();
      intent.structured_data.push(StructuredDataBlock::new(
        "ld-faq",
        json!({ "@context": SCHEMA_CONTEXT, "@type": "FAQPage", "mainEntity": questions }),
      ));
    }

    let mut crumbs = vec![(site_name.to_string(), site.localized_url("/", locale))];
    if let Some(category) = &content.category {
      crumbs.push((category.clone(), site.localized_url(&category_path(category), locale)));
    }
    crumbs.push((content.title.clone(), url));
    let items: Vec<Value> = crumbs
      .into_iter()
      .enumerate()
      .map(|(i, (name, item))| {
        json!({ "@type": "ListItem", "position": i + 1, "name": name, "item": item })
      })
      .collect();
    intent.structured_data.push(StructuredDataBlock::new(
      "ld-breadcrumb",
      json!({ "@context": SCHEMA_CONTEXT, "@type": "BreadcrumbList", "itemListElement": items }),
    ));

    if let Some(raw) = &content.structured_data {
      intent.structured_data.push(StructuredDataBlock::raw("ld-content", raw.clone()));
    }
    Some(intent)
  }
}

fn category_path(category: &str) -> String {
  let slug: String = category
    .trim()
    .chars()
    .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
    .collect();
  format!("/category/{}", slug.trim_matches('-'))
}

struct PageSummary<'a> {
  path: &'a str,
  /// Full document title, site name included.
  title: String,
  /// Bare title for social cards.
  headline: String,
  description: Option<String>,
  keywords: &'a [String],
  image: Option<&'a str>,
  og_type: &'a str,
  noindex: bool,
  modified_time: Option<&'a str>,
}

/// Fields every view shares: title, description, keywords, robots, geo,
/// social cards, canonical and hreflang.
fn base_intent(site: &SiteConfig, locale: Locale, page: &PageSummary<'_>) -> MetadataIntent {
  let canonical = site.localized_url(page.path, locale);
  let image = page.image.map(String::from).or_else(|| site.default_image.clone());

  let mut keywords: Vec<String> = page.keywords.to_vec();
  for keyword in &site.keywords {
    if !keywords.contains(keyword) {
      keywords.push(keyword.clone());
    }
  }

  let robots = if page.noindex { "noindex, nofollow".to_string() } else { site.robots.clone() };

  MetadataIntent {
    title: Some(page.title.clone()),
    description: page.description.clone(),
    keywords,
    html_lang: Some(locale.as_str().to_string()),
    robots: Some(robots),
    author: site.author.clone(),
    geo: Some(GeoTags {
      region: Some(locale.region().to_string()),
      placename: site.placename(locale).map(String::from),
    }),
    open_graph: Some(OpenGraph {
      title: Some(page.headline.clone()),
      description: page.description.clone(),
      og_type: Some(page.og_type.to_string()),
      url: Some(canonical.clone()),
      image: image.clone(),
      site_name: Some(site.site_name(locale).to_string()),
      locale: Some(locale.og_locale().to_string()),
      modified_time: page.modified_time.map(String::from),
    }),
    twitter: Some(TwitterCard {
      card: Some(if image.is_some() { "summary_large_image" } else { "summary" }.to_string()),
      title: Some(page.headline.clone()),
      description: page.description.clone(),
      image,
      site: site.twitter_site.clone(),
    }),
    canonical_url: Some(canonical),
    hreflang: site.hreflang_entries(page.path),
    structured_data: Vec::new(),
  }
}
