//! lumiere-core: screen logic shared by the TUI and CLI
//!
//! Implements the list-fetch/paginate/filter cycle, the create/edit modal,
//! delete confirmation, dependent address selection, voucher arithmetic, the
//! skin quiz and the cookie jar. Network access goes through the
//! [`CollectionSource`] and [`AddressSource`] traits.

pub mod address;
pub mod config;
pub mod cookies;
pub mod delete;
pub mod error;
pub mod forms;
pub mod list;
pub mod modal;
pub mod notify;
pub mod quiz;
pub mod screen;
pub mod source;
pub mod voucher;

pub use address::AddressSelector;
pub use config::{ApiConfig, Config, SessionConfig, UiConfig};
pub use cookies::{Cookie, CookieStore, SKIN_TEST_COOKIE, TOKEN_COOKIE};
pub use delete::{DeleteDialog, DeleteTarget};
pub use error::{CoreError, Result};
pub use forms::{Editable, FieldKind, FieldSpec, FormFields, ValidationError, validate};
pub use list::{ListController, ListViewState, LoadPhase, filter_and_paginate, lookup_name};
pub use modal::{CloseRequest, ModalMode, MutationModal, SubmitOutcome};
pub use notify::{Level, Notification, Notifier};
pub use quiz::{SkinQuiz, SkinTestResult};
pub use screen::ResourceScreen;
pub use source::{AddressSource, CollectionSource};
