/* src/client/binding/rust/src/lib.rs */

//! Glue between the locale store and the head engine.
//!
//! A [`ContentView`] turns `(site, locale, input)` into a metadata intent.
//! [`ContentBinding`] memoizes on `(locale, input)` so the engine only sees an
//! intent when one of them actually changed, and [`SiteRuntime`] owns the
//! store, the engine and every mounted binding.

pub mod binding;
pub mod content;
pub mod errors;
pub mod runtime;
pub mod site;
pub mod views;

pub use binding::{ContentBinding, SyncOutcome};
pub use content::{Content, FaqEntry};
pub use errors::BindingError;
pub use runtime::{SiteRuntime, ViewId};
pub use site::{LocaleOverrides, SiteConfig, UrlStrategy};
pub use views::{ContentView, DynamicContentPage, PageMeta, SeoHead};
