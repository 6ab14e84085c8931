use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedReceiver;

use lumiere_api::address::{District, Province, Ward};
use lumiere_api::catalog::{Brand, Category, Packaging, Product, Tag};
use lumiere_api::commerce::{Order, Voucher};
use lumiere_api::{EntityId, ListResponse, PaginationMode, ResourceKind, ResourcePage};
use lumiere_client::{ClientError, HttpClient, ListQuery, Session};
use lumiere_core::{
    AddressSelector, AddressSource, CloseRequest, CollectionSource, DeleteTarget, Level,
    ListController, LoadPhase, MutationModal, Notification, Notifier, ResourceScreen,
    SubmitOutcome,
};

// In-memory backend
#[derive(Default)]
struct MemorySource {
    collections: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    queries: Mutex<Vec<ListQuery>>,
    writes: AtomicUsize,
    next_id: AtomicUsize,
    reject: Mutex<Option<String>>,
}

impl MemorySource {
    fn with(kind: ResourceKind, items: Vec<Value>) -> Arc<Self> {
        let source = Self {
            next_id: AtomicUsize::new(100),
            ..Self::default()
        };
        source.collections.lock().unwrap().insert(kind, items);
        Arc::new(source)
    }

    fn reject_writes(&self, message: &str) {
        *self.reject.lock().unwrap() = Some(message.to_string());
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), ClientError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.reject.lock().unwrap().clone() {
            Some(message) => Err(ClientError::Api {
                status: 409,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CollectionSource for MemorySource {
    async fn list(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> Result<ListResponse<Value>, ClientError> {
        self.queries.lock().unwrap().push(query.clone());
        let items = self
            .collections
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        Ok(match kind.pagination() {
            PaginationMode::Client => ListResponse::Plain(items),
            PaginationMode::Server => {
                let size = query.page_size.unwrap_or(10);
                let page = query.page.unwrap_or(1);
                let total_items = items.len();
                ListResponse::Paged(ResourcePage {
                    items: items.into_iter().skip((page - 1) * size).take(size).collect(),
                    total_pages: total_items.div_ceil(size).max(1),
                    total_items,
                })
            }
        })
    }

    async fn create(&self, kind: ResourceKind, mut payload: Value) -> Result<Value, ClientError> {
        self.check_write()?;
        payload["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(payload.clone());
        Ok(payload)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &EntityId,
        payload: Value,
    ) -> Result<Value, ClientError> {
        self.check_write()?;
        let mut collections = self.collections.lock().unwrap();
        let item = collections
            .get_mut(&kind)
            .and_then(|items| items.iter_mut().find(|item| item["id"] == json!(id)))
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "Not found".into(),
            })?;
        if let (Value::Object(item), Value::Object(changes)) = (item, payload) {
            item.extend(changes);
        }
        Ok(Value::Null)
    }

    async fn delete(&self, kind: ResourceKind, id: &EntityId) -> Result<(), ClientError> {
        self.check_write()?;
        if let Some(items) = self.collections.lock().unwrap().get_mut(&kind) {
            items.retain(|item| item["id"] != json!(id));
        }
        Ok(())
    }
}

fn named(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({"id": i, "name": format!("Item {i}"), "description": ""}))
        .collect()
}

fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[tokio::test]
async fn test_search_resets_to_first_page() {
    let source = MemorySource::with(ResourceKind::Category, named(25));
    let (notifier, _rx) = Notifier::channel();
    let mut list = ListController::<Category>::new(source, notifier);

    list.change_page(3).await;
    assert_eq!(list.state().page, 3);
    assert_eq!(list.state().items.len(), 5);

    list.change_search("item 1").await;
    assert_eq!(list.state().page, 1);
    // "Item 1" and "Item 10".."Item 19"
    assert_eq!(list.state().total_items, 11);
    assert_eq!(list.state().total_pages, 2);
}

#[tokio::test]
async fn test_search_without_match_is_empty() {
    let source = MemorySource::with(ResourceKind::Category, named(3));
    let (notifier, _rx) = Notifier::channel();
    let mut list = ListController::<Category>::new(source, notifier);

    list.change_search("zzz").await;
    assert_eq!(list.state().total_items, 0);
    assert!(list.state().items.is_empty());
    assert_eq!(list.state().phase, LoadPhase::Loaded);
}

#[tokio::test]
async fn test_server_paged_kinds_send_page_and_name() {
    let products: Vec<Value> = (1..=45)
        .map(|i| json!({"id": i, "name": format!("Serum {i}"), "price": 1000}))
        .collect();
    let source = MemorySource::with(ResourceKind::Product, products);
    let (notifier, _rx) = Notifier::channel();
    let mut list = ListController::<Product>::new(source.clone(), notifier);

    list.change_page(2).await;
    list.change_search(" serum ").await;

    let queries = source.queries.lock().unwrap().clone();
    assert_eq!(queries[0].page, Some(2));
    assert_eq!(queries[0].page_size, Some(20));
    assert_eq!(queries[1].page, Some(1));
    assert_eq!(queries[1].name.as_deref(), Some("serum"));
    assert_eq!(list.state().total_pages, 3);
}

#[tokio::test]
async fn test_page_change_moves_selection_to_top() {
    let source = MemorySource::with(ResourceKind::Tag, named(15));
    let (notifier, _rx) = Notifier::channel();
    let mut list = ListController::<Tag>::new(source, notifier);

    list.fetch().await;
    list.select_last();
    assert_eq!(list.state().selected, 9);

    list.next_page().await;
    assert_eq!(list.state().page, 2);
    assert_eq!(list.state().selected, 0);

    list.next_page().await;
    assert_eq!(list.state().page, 2);
}

#[tokio::test]
async fn test_validation_blocks_network() {
    let source = MemorySource::with(ResourceKind::Brand, Vec::new());
    let (notifier, mut rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Brand>::new(source.clone(), notifier);

    screen.open_create();
    let outcome = screen.submit_modal().await.unwrap();

    let err = match outcome {
        SubmitOutcome::Invalid(err) => err,
        other => panic!("expected validation failure, got {other:?}"),
    };
    assert_eq!(err.field, "name");
    assert_eq!(source.writes(), 0);
    assert!(screen.modal().is_some());

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].message, "Name is required");
}

#[tokio::test]
async fn test_unsaved_changes_need_confirmation() {
    let source = MemorySource::with(ResourceKind::Brand, Vec::new());
    let (notifier, _rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Brand>::new(source, notifier);

    screen.open_create();
    assert_eq!(screen.close_modal(), CloseRequest::Closed);
    assert!(screen.modal().is_none());

    screen.open_create();
    screen.modal_mut().unwrap().input_char('A');
    assert_eq!(screen.close_modal(), CloseRequest::NeedsConfirmation);
    assert!(screen.modal().is_some_and(MutationModal::is_confirming_close));

    screen.discard_modal();
    assert!(screen.modal().is_none());
}

#[tokio::test]
async fn test_create_brand_then_refetch() {
    let source = MemorySource::with(ResourceKind::Brand, Vec::new());
    let (notifier, mut rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Brand>::new(source.clone(), notifier);
    screen.mount().await;
    assert!(screen.list().state().items.is_empty());

    screen.open_create();
    let modal = screen.modal_mut().unwrap();
    modal.set("name", "Acme");
    modal.set("description", "desc");
    let outcome = screen.submit_modal().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert!(screen.modal().is_none());
    let items = &screen.list().state().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Acme");
    assert_eq!(items[0].description, "desc");

    let notes = drain(&mut rx);
    assert!(
        notes
            .iter()
            .any(|n| n.level == Level::Success && n.message == "Brand created successfully")
    );
}

#[tokio::test]
async fn test_backend_rejection_keeps_modal_values() {
    let source = MemorySource::with(ResourceKind::Packaging, Vec::new());
    source.reject_writes("Packaging name already exists");
    let (notifier, mut rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Packaging>::new(source.clone(), notifier);

    screen.open_create();
    screen.modal_mut().unwrap().set("name", "Pump bottle");
    let outcome = screen.submit_modal().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Packaging name already exists".into())
    );
    let modal = screen.modal().unwrap();
    assert_eq!(modal.fields().get("name"), "Pump bottle");
    assert_eq!(drain(&mut rx)[0].message, "Packaging name already exists");
}

#[tokio::test]
async fn test_order_edit_changes_status_only() {
    let orders = vec![json!({
        "id": 7,
        "customerName": "Linh",
        "phone": "0901",
        "status": "Pending",
        "total": 500000
    })];
    let source = MemorySource::with(ResourceKind::Order, orders);
    let (notifier, _rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Order>::new(source.clone(), notifier);
    screen.mount().await;

    screen.open_edit_selected();
    let modal = screen.modal_mut().unwrap();
    assert_eq!(modal.fields().get("status"), "Pending");
    modal.set("status", "delivered");
    assert!(matches!(
        screen.submit_modal().await,
        Some(SubmitOutcome::Saved(_))
    ));

    let order = &screen.list().state().items[0];
    assert_eq!(order.status.as_str(), "Delivered");
    assert_eq!(order.customer_name, "Linh");
    assert!(!screen.open_delete_selected());
}

#[tokio::test]
async fn test_soft_delete_tag_then_refetch() {
    let tags = vec![
        json!({"id": 4, "name": "Vegan"}),
        json!({"id": 5, "name": "Cruelty free"}),
        json!({"id": 6, "name": "Fragrance free"}),
    ];
    let source = MemorySource::with(ResourceKind::Tag, tags);
    let (notifier, _rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Tag>::new(source, notifier);
    screen.mount().await;

    screen.list_mut().select_next();
    assert!(screen.open_delete_selected());
    let dialog = screen.delete_dialog().unwrap();
    assert_eq!(dialog.target(), &DeleteTarget::Tag(EntityId::Number(5)));
    assert_eq!(
        dialog.prompt(),
        "Are you sure you want to delete tag \"Cruelty free\"?"
    );

    assert_eq!(screen.confirm_delete().await, Some(true));
    assert!(screen.delete_dialog().is_none());
    let ids: Vec<&EntityId> = screen.list().state().items.iter().map(|t| &t.id).collect();
    assert_eq!(ids, [&EntityId::Number(4), &EntityId::Number(6)]);
}

#[tokio::test]
async fn test_failed_delete_still_refetches() {
    let source = MemorySource::with(ResourceKind::Tag, named(2));
    source.reject_writes("Tag is in use");
    let (notifier, mut rx) = Notifier::channel();
    let mut screen = ResourceScreen::<Tag>::new(source.clone(), notifier);
    screen.mount().await;
    let fetches = source.queries.lock().unwrap().len();

    assert!(screen.open_delete_selected());
    assert_eq!(screen.confirm_delete().await, Some(false));
    assert_eq!(source.queries.lock().unwrap().len(), fetches + 1);
    assert_eq!(screen.list().state().items.len(), 2);
    assert_eq!(drain(&mut rx)[0].message, "Tag is in use");
}

async fn spawn_failing_backend() -> SocketAddr {
    let app = Router::new().route(
        "/api/voucher",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Database unavailable"})),
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_failed_fetch_surfaces_error() {
    let addr = spawn_failing_backend().await;
    let client = HttpClient::new(format!("http://{addr}"), Session::new()).unwrap();
    let (notifier, mut rx) = Notifier::channel();
    let mut list = ListController::<Voucher>::new(Arc::new(client), notifier);

    list.fetch().await;

    assert!(!list.state().is_loading());
    assert_eq!(list.state().error(), Some("Database unavailable"));
    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
}

// Address dataset
struct MemoryAddresses;

#[async_trait]
impl AddressSource for MemoryAddresses {
    async fn provinces(&self) -> Result<Vec<Province>, ClientError> {
        Ok(vec![
            Province {
                code: 1,
                name: "Ha Noi".into(),
                districts: Vec::new(),
            },
            Province {
                code: 79,
                name: "Ho Chi Minh".into(),
                districts: Vec::new(),
            },
        ])
    }

    async fn districts(&self, province_code: u32) -> Result<Vec<District>, ClientError> {
        Ok(vec![District {
            code: province_code * 100,
            name: format!("District of {province_code}"),
            wards: Vec::new(),
        }])
    }

    async fn wards(&self, district_code: u32) -> Result<Vec<Ward>, ClientError> {
        if district_code == 0 {
            return Err(ClientError::Api {
                status: 404,
                message: "Unknown district".into(),
            });
        }
        Ok(vec![Ward {
            code: district_code + 1,
            name: format!("Ward of {district_code}"),
        }])
    }
}

#[tokio::test]
async fn test_address_selection_resets_downstream() {
    let (notifier, _rx) = Notifier::channel();
    let mut selector = AddressSelector::new(Arc::new(MemoryAddresses), notifier);
    selector.load_provinces().await;
    assert_eq!(selector.provinces().len(), 2);

    let hanoi = selector.provinces()[0].clone();
    selector.select_province(hanoi).await;
    let district = selector.districts()[0].clone();
    selector.select_district(district).await;
    let ward = selector.wards()[0].clone();
    selector.select_ward(ward);

    let address = selector.to_shipping_address("12 Trang Tien").unwrap();
    assert_eq!(address.province_code, 1);
    assert_eq!(address.district_code, 100);
    assert_eq!(address.ward_code, 101);

    let hcm = selector.provinces()[1].clone();
    selector.select_province(hcm).await;
    assert!(selector.district().is_none());
    assert!(selector.ward().is_none());
    assert!(selector.wards().is_empty());
    assert_eq!(selector.districts()[0].code, 7900);
    assert!(selector.to_shipping_address("").is_none());
}

#[tokio::test]
async fn test_address_failure_notifies() {
    let (notifier, mut rx) = Notifier::channel();
    let mut selector = AddressSelector::new(Arc::new(MemoryAddresses), notifier);

    selector
        .select_district(District {
            code: 0,
            name: "Nowhere".into(),
            wards: Vec::new(),
        })
        .await;

    assert!(selector.wards().is_empty());
    assert_eq!(drain(&mut rx)[0].message, "Unknown district");
}
