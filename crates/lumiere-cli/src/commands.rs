//! Subcommand implementations

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use color_eyre::Result;
use color_eyre::eyre::{bail, eyre};
use tokio::sync::mpsc::UnboundedReceiver;

use lumiere_api::account::ProfileUpdate;
use lumiere_api::catalog::{
    Batch, Brand, Category, Formulation, Ingredient, Packaging, Product, SkinType, Tag,
};
use lumiere_api::commerce::{Order, Voucher};
use lumiere_api::content::{BlogPost, Question};
use lumiere_api::{EntityId, ListResponse, Resource, ResourceKind};
use lumiere_client::{AddressClient, HttpClient, Session};
use lumiere_core::voucher::{
    can_afford, discount_for, points_after_redeem, points_short, redeemable,
    sort_by_affordability,
};
use lumiere_core::{
    AddressSelector, Config, CookieStore, DeleteDialog, Editable, Level, ListController,
    MutationModal, Notification, Notifier, SkinQuiz, SubmitOutcome,
};

use crate::prompt;

/// Run `$body` with `$R` bound to the entity type of `$kind`
macro_rules! with_resource {
    ($kind:expr, $R:ident => $body:expr) => {
        match $kind {
            ResourceKind::Product => { type $R = Product; $body }
            ResourceKind::Batch => { type $R = Batch; $body }
            ResourceKind::Brand => { type $R = Brand; $body }
            ResourceKind::Category => { type $R = Category; $body }
            ResourceKind::Packaging => { type $R = Packaging; $body }
            ResourceKind::Formulation => { type $R = Formulation; $body }
            ResourceKind::Ingredient => { type $R = Ingredient; $body }
            ResourceKind::SkinType => { type $R = SkinType; $body }
            ResourceKind::Tag => { type $R = Tag; $body }
            ResourceKind::Voucher => { type $R = Voucher; $body }
            ResourceKind::BlogPost => { type $R = BlogPost; $body }
            ResourceKind::Order => { type $R = Order; $body }
            ResourceKind::Question => { type $R = Question; $body }
        }
    };
}

/// Everything a subcommand needs
pub struct Context {
    config: Config,
    client: Arc<HttpClient>,
    cookies: CookieStore,
    notifier: Notifier,
    notifications: UnboundedReceiver<Notification>,
}

impl Context {
    pub fn new(config: Config, server: Option<String>) -> Result<Self> {
        let base_url = server.unwrap_or_else(|| config.api.base_url.clone());
        let mut cookies = CookieStore::load(config.session.cookie_path())?;
        let session = cookies.token().map_or_else(Session::new, Session::with_token);
        let client = HttpClient::new(&base_url, session)?;
        tracing::debug!(%base_url, cookies = %cookies.path().display(), "client ready");

        let (notifier, notifications) = Notifier::channel();
        Ok(Self {
            config,
            client: Arc::new(client),
            cookies,
            notifier,
            notifications,
        })
    }

    /// Print pending notifications; true if any of them was an error
    fn report(&mut self) -> bool {
        let mut failed = false;
        while let Ok(notification) = self.notifications.try_recv() {
            match notification.level {
                Level::Error => {
                    failed = true;
                    eprintln!("✗ {}", notification.message);
                }
                Level::Success => println!("✓ {}", notification.message),
                Level::Info => println!("{}", notification.message),
            }
        }
        failed
    }

    fn require_login(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            Ok(())
        } else {
            Err(eyre!("not signed in, run `lumiere login` first"))
        }
    }

    pub async fn login(&mut self, email: &str, password: Option<String>) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => prompt::ask("Password:")?,
        };
        let token = self.client.login(email, &password).await?;
        self.cookies.set_token(token);
        self.cookies.save()?;
        println!("✓ Signed in as {email}");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.client.logout();
        self.cookies.clear_token();
        self.cookies.save()?;
        println!("Signed out");
        Ok(())
    }

    pub async fn list(
        &mut self,
        kind: ResourceKind,
        page: usize,
        search: Option<String>,
        json: bool,
    ) -> Result<()> {
        with_resource!(kind, R => self.list_page::<R>(page, search, json).await)
    }

    async fn list_page<R: Resource>(
        &mut self,
        page: usize,
        search: Option<String>,
        json: bool,
    ) -> Result<()> {
        let mut list = ListController::<R>::new(self.client.clone(), self.notifier.clone())
            .with_search(search.unwrap_or_default());
        list.change_page(page).await;

        let state = list.state();
        if let Some(message) = state.error() {
            self.report();
            bail!("could not load {}: {message}", R::KIND.title().to_lowercase());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&state.items)?);
            return Ok(());
        }

        if state.items.is_empty() {
            println!("No {} found", R::KIND.title().to_lowercase());
        }
        for item in &state.items {
            println!("{:>8}  {}", item.id().to_string(), item.display_name());
        }
        println!(
            "-- page {}/{}, {} total",
            state.page, state.total_pages, state.total_items
        );
        Ok(())
    }

    pub async fn create(&mut self, kind: ResourceKind, fields: &[(String, String)]) -> Result<()> {
        self.require_login()?;
        let modal = with_resource!(kind, R => MutationModal::create::<R>());
        self.submit(modal, fields).await
    }

    pub async fn edit(
        &mut self,
        kind: ResourceKind,
        id: &EntityId,
        fields: &[(String, String)],
    ) -> Result<()> {
        self.require_login()?;
        let modal = with_resource!(kind, R => self.edit_modal::<R>(id).await?);
        self.submit(modal, fields).await
    }

    async fn edit_modal<R: Editable>(&self, id: &EntityId) -> Result<MutationModal> {
        let entity = self.client.resource::<R>().get(id).await?;
        Ok(MutationModal::edit(&entity))
    }

    async fn submit(&mut self, mut modal: MutationModal, fields: &[(String, String)]) -> Result<()> {
        for (name, value) in fields {
            let spec = modal
                .specs()
                .iter()
                .find(|spec| spec.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    let known: Vec<&str> = modal.specs().iter().map(|spec| spec.name).collect();
                    eyre!("unknown field `{name}`, expected one of: {}", known.join(", "))
                })?;
            modal.set(spec.name, value.clone());
        }

        let outcome = modal.submit(self.client.as_ref(), &self.notifier).await;
        self.report();
        match outcome {
            SubmitOutcome::Saved(value) => {
                tracing::debug!("server returned {value}");
                Ok(())
            }
            SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {
                bail!("{} was not saved", modal.title())
            }
        }
    }

    pub async fn delete(&mut self, kind: ResourceKind, id: &EntityId, yes: bool) -> Result<()> {
        self.require_login()?;
        if kind.deletion().is_none() {
            bail!("{} cannot be deleted", kind.title().to_lowercase());
        }
        let dialog = with_resource!(kind, R => self.delete_dialog::<R>(id).await?);

        if !yes && !prompt::confirm(&dialog.prompt())? {
            println!("Cancelled");
            return Ok(());
        }

        let deleted = dialog.confirm(self.client.as_ref(), &self.notifier).await;
        self.report();
        if deleted {
            Ok(())
        } else {
            bail!("{} {id} was not deleted", kind.label())
        }
    }

    async fn delete_dialog<R: Resource>(&self, id: &EntityId) -> Result<DeleteDialog> {
        let entity = self.client.resource::<R>().get(id).await?;
        DeleteDialog::open(&entity).ok_or_else(|| eyre!("{} cannot be deleted", R::KIND.label()))
    }

    pub async fn upload_image(&mut self, kind: ResourceKind, id: &EntityId, file: &Path) -> Result<()> {
        self.require_login()?;
        if !file.is_file() {
            bail!("{} is not a file", file.display());
        }
        self.client.upload_kind_image(kind, id, file).await?;
        println!("✓ Image uploaded for {} {id}", kind.label());
        Ok(())
    }

    pub async fn vouchers(&mut self, points: Option<u32>, total: Option<u64>) -> Result<()> {
        let points = match points {
            Some(points) => points,
            None => {
                self.require_login()?;
                self.client.profile().await?.points
            }
        };

        let response = self
            .client
            .resource::<Voucher>()
            .list()
            .page(1)
            .page_size(100)
            .send()
            .await?;
        let mut vouchers: Vec<Voucher> = match response {
            ListResponse::Paged(page) => page.items,
            ListResponse::Plain(items) => items,
        };
        vouchers.retain(redeemable);
        sort_by_affordability(&mut vouchers, points);

        println!("You have {points} points");
        if vouchers.is_empty() {
            println!("No vouchers available right now");
        }
        for voucher in &vouchers {
            let standing = match points_after_redeem(points, voucher) {
                Some(left) if can_afford(points, voucher) => format!("✓ {left} points left after"),
                _ => format!("needs {} more points", points_short(points, voucher)),
            };
            let preview = total
                .map(|total| format!(", saves {} ₫", discount_for(voucher, total)))
                .unwrap_or_default();
            println!(
                "{:<16} {:>3}%  {:>6} pts  {standing}{preview}",
                voucher.code, voucher.discount_percent, voucher.points_required
            );
        }
        Ok(())
    }

    pub async fn quiz(&mut self) -> Result<()> {
        let questions = self.fetch_all::<Question>().await?;
        let skin_types = self.fetch_all::<SkinType>().await?;
        if questions.is_empty() {
            bail!("the quiz has no questions yet");
        }

        let mut quiz = SkinQuiz::new(questions);
        let total = quiz.questions().len();
        for index in 0..total {
            let question = &quiz.questions()[index];
            let title = format!("\n[{}/{total}] {}", index + 1, question.content);
            let answers = question.answers.clone();
            if answers.is_empty() {
                tracing::warn!("question {} has no answers", question.id);
                continue;
            }
            let choice = prompt::choose(&title, &answers, |answer| answer.content.as_str())?;
            quiz.answer(index, choice)?;
        }

        let now = Utc::now();
        let result = quiz
            .result(&skin_types, now)
            .ok_or_else(|| eyre!("no answers were given"))?;
        println!("\nYour skin type: {}", result.skin_type_name);

        self.cookies.push_skin_test_result(result, now)?;
        self.cookies.save()?;
        Ok(())
    }

    pub fn quiz_history(&mut self) -> Result<()> {
        let results = self.cookies.skin_test_results(Utc::now());
        if results.is_empty() {
            println!("No quiz results in the last 24 hours");
        }
        for result in results {
            println!(
                "{}  {}",
                result.taken_at.format("%Y-%m-%d %H:%M"),
                result.skin_type_name
            );
        }
        Ok(())
    }

    pub async fn show_profile(&mut self) -> Result<()> {
        self.require_login()?;
        let profile = self.client.profile().await?;
        println!("{} <{}>", profile.full_name, profile.email);
        if !profile.phone.is_empty() {
            println!("Phone:   {}", profile.phone);
        }
        println!("Points:  {}", profile.points);
        match profile.address {
            Some(address) => println!(
                "Address: {}, {}, {}, {}",
                address.street, address.ward_name, address.district_name, address.province_name
            ),
            None => println!("Address: --"),
        }
        Ok(())
    }

    pub async fn pick_address(&mut self) -> Result<()> {
        self.require_login()?;
        let addresses = AddressClient::new(&self.config.api.address_url)?;
        let mut selector = AddressSelector::new(Arc::new(addresses), self.notifier.clone());

        selector.load_provinces().await;
        if self.report() || selector.provinces().is_empty() {
            bail!("could not load provinces");
        }
        let index = prompt::choose("Province", selector.provinces(), |p| p.name.as_str())?;
        let province = selector.provinces()[index].clone();
        selector.select_province(province).await;
        if self.report() {
            bail!("could not load districts");
        }

        if selector.districts().is_empty() {
            bail!("no districts for {}", province_name(&selector));
        }
        let index = prompt::choose("District", selector.districts(), |d| d.name.as_str())?;
        let district = selector.districts()[index].clone();
        selector.select_district(district).await;
        if self.report() {
            bail!("could not load wards");
        }

        if selector.wards().is_empty() {
            let district = selector.district().map_or("", |d| d.name.as_str());
            bail!("no wards for {district}, {}", province_name(&selector));
        }
        let index = prompt::choose("Ward", selector.wards(), |w| w.name.as_str())?;
        let ward = selector.wards()[index].clone();
        selector.select_ward(ward);

        let street = prompt::ask("Street and house number:")?;
        let address = selector
            .to_shipping_address(street)
            .ok_or_else(|| eyre!("address is incomplete"))?;

        let update = ProfileUpdate {
            address: Some(address),
            ..ProfileUpdate::default()
        };
        self.client.update_profile(&update).await?;
        println!("✓ Address saved");
        Ok(())
    }

    /// Every record of `R` in one request
    async fn fetch_all<R: Resource>(&self) -> Result<Vec<R>> {
        let response = self.client.resource::<R>().list().page(1).page_size(100).send().await?;
        Ok(match response {
            ListResponse::Paged(page) => page.items,
            ListResponse::Plain(items) => items,
        })
    }
}

fn province_name(selector: &AddressSelector) -> &str {
    selector.province().map_or("", |p| p.name.as_str())
}
