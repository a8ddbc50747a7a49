use std::sync::Arc;

use anyhow::{Context, Result};
use property_centre::catalogue::{sample::sample_properties, Catalogue, PropertyFilters};
use property_centre::config::Config;
use property_centre::listing::{
    HttpListingService, ListingService, ListingWizard, LocalListingService, SessionPreviews,
    WizardError, TOTAL_STEPS,
};
use property_centre::models::{FileHandle, ListingField, ListingId, ListingKind, Role};
use property_centre::notifications::{MockNotificationService, NotificationCenter, NotificationFilter};
use property_centre::session::{AuthError, MockAuth, SessionProvider, SignupData};
use property_centre::storage::{FileStore, KeyValueStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_EMAIL: &str = "demo@propertycentre.com";
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Property Centre - listing desk");
    info!("==================================");

    let config = Config::from_env()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&config.data_dir)
            .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?,
    );

    let auth = Arc::new(MockAuth::new(store.clone())?);
    sign_in_demo_user(&auth).await?;

    let local = config
        .use_mock_backend
        .then(|| Arc::new(LocalListingService::new(store.clone()).with_latency(config.mock_latency)));
    let service: Arc<dyn ListingService> = if let Some(local) = &local {
        local.clone()
    } else {
        Arc::new(HttpListingService::new(&config.api_url, config.submit_timeout)?)
    };
    info!("Listings go to the {}", service.service_name());

    let wizard = ListingWizard::new(service, auth.clone(), Arc::new(SessionPreviews::new()))
        .with_submit_timeout(config.submit_timeout);
    let created = run_demo_wizard(&wizard).await?;

    if let (Some(local), Some(id)) = (local, created) {
        edit_demo_listing(local, auth.clone(), &id).await?;
    }

    show_notifications().await;
    show_catalogue(store)?;

    Ok(())
}

async fn sign_in_demo_user(auth: &MockAuth) -> Result<()> {
    if let Some(user) = auth.current_user() {
        info!("Signed in as {}", user.full_name());
        return Ok(());
    }

    match auth.login(DEMO_EMAIL, DEMO_PASSWORD).await {
        Ok(user) => info!("Signed in as {}", user.full_name()),
        Err(AuthError::InvalidCredentials) => {
            let user = auth
                .signup(SignupData {
                    first_name: "Demo".to_string(),
                    last_name: "Host".to_string(),
                    email: DEMO_EMAIL.to_string(),
                    password: DEMO_PASSWORD.to_string(),
                    role: Role::AccommodationProvider,
                })
                .await?;
            info!("Created demo account for {}", user.full_name());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn run_demo_wizard(wizard: &ListingWizard) -> Result<Option<ListingId>> {
    info!("Step 1: basic info");
    wizard.set_kind(ListingKind::Apartment)?;
    wizard.set_field(ListingField::Title, "Modern Studio Apartment")?;

    // Description is still empty, so this is refused
    if let Err(WizardError::Invalid(errors)) = wizard.next() {
        for (field, message) in &errors {
            warn!("   {}: {}", field, message);
        }
    }
    wizard.set_field(
        ListingField::Description,
        "Floor-to-ceiling windows and an open-plan kitchen",
    )?;
    wizard.next()?;

    info!("Step 2: details & features");
    wizard.set_field(ListingField::Address, "12 Allen Avenue")?;
    wizard.set_field(ListingField::City, "Ikeja")?;
    wizard.set_field(ListingField::State, "Lagos")?;
    wizard.set_field(ListingField::Rooms, "1")?;
    wizard.set_field(ListingField::Bathrooms, "1")?;
    for feature in ["Air Conditioning", "Parking", "Security"] {
        wizard.toggle_feature(feature)?;
    }
    wizard.toggle_amenity("Wi-Fi")?;
    wizard.next()?;

    info!("Step 3: photos");
    let report = wizard.add_images(vec![
        FileHandle::new("living-room.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]),
        FileHandle::new("floor-plan.pdf", b"%PDF-1.7".to_vec()),
        FileHandle::new("kitchen.png", vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
    ])?;
    for rejected in &report.rejected {
        warn!("   ⚠️  {}", rejected);
    }
    wizard.next()?;

    info!("Step 4: pricing & terms");
    wizard.set_field(ListingField::Price, "2500")?;
    wizard.set_field(ListingField::Terms, "12 month minimum lease")?;

    match wizard.submit().await {
        Ok(id) => {
            println!("Listing created with id {}", id);
            Ok(Some(id))
        }
        Err(e) => {
            let state = wizard.state();
            if let Some(terminal) = state.terminal_error {
                println!("{} (retry possible: {})", terminal.message, terminal.retryable);
            } else {
                println!("Listing not submitted: {}", e);
            }
            Ok(None)
        }
    }
}

async fn edit_demo_listing(
    local: Arc<LocalListingService>,
    auth: Arc<MockAuth>,
    id: &ListingId,
) -> Result<()> {
    let Some(stored) = local.get(&id.0)? else {
        warn!("Listing {} vanished before it could be edited", id);
        return Ok(());
    };

    info!("✏️  Editing listing {}", id);
    let wizard = ListingWizard::for_existing(&stored, local.clone(), auth, Arc::new(SessionPreviews::new()));
    wizard.set_field(ListingField::Price, "2300")?;
    wizard.toggle_amenity("Pool")?;
    wizard.go_to_step(TOTAL_STEPS)?;
    wizard.submit().await?;

    if let Some(updated) = local.get(&id.0)? {
        println!(
            "Listing {} now {} at {} ({} image(s))",
            updated.id,
            updated.listing.title,
            updated.listing.price,
            updated.listing.images.len()
        );
    }
    Ok(())
}

async fn show_notifications() {
    let mut center = NotificationCenter::new(Arc::new(MockNotificationService::new()));
    if let Err(e) = center.load().await {
        warn!("Notifications unavailable: {}", e);
        return;
    }

    println!();
    println!("🔔 {} unread notification(s)", center.unread_count());
    for notification in center.notifications(NotificationFilter::Unread) {
        println!("   {} - {}", notification.title, notification.message);
    }

    center.mark_all_read();
    let report = center.sync().await;
    for toast in &report.rolled_back {
        warn!("{}", toast.message);
    }
    println!("   {} change(s) confirmed, {} unread left", report.confirmed, center.unread_count());
}

fn show_catalogue(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let mut catalogue = Catalogue::new(sample_properties(), store)?;

    println!();
    println!("🏘️  Apartments with parking:");
    let filters = PropertyFilters {
        property_type: Some("Apartment".to_string()),
        features: vec!["Parking".to_string()],
        ..Default::default()
    };
    for (i, property) in catalogue.filter(&filters).iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.name, property.price);
        println!("   {}", property.location);
        println!("   Features: {}", property.features.join(", "));
    }

    catalogue.add_favorite("3")?;
    println!("   Favorites: {}", catalogue.favorites().join(", "));
    Ok(())
}
