use actix_web::{App, HttpServer, middleware::Logger, web};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billbook::{
  adapters::http::{
    AuthMiddleware, RequestIdMiddleware, configure_bill_routes, configure_challan_routes,
    configure_numbering_routes, configure_party_routes,
  },
  application::billing::{
    CancelBillUseCase, ConvertChallanUseCase, CreateBillUseCase, CreateChallanUseCase,
    DeleteBillUseCase, DeleteChallanUseCase, GetBillDocumentUseCase, GetBillUseCase,
    GetChallanDocumentUseCase, GetChallanUseCase, ListBillsUseCase, ListChallansUseCase,
    PeekNextNumberUseCase, RecordPaymentUseCase, RemovePaymentUseCase, UpdateBillUseCase,
    UpdateChallanUseCase,
  },
  application::party::{
    CreatePartyUseCase, DeletePartyUseCase, GetPartyUseCase, ListPartiesUseCase,
    UpdatePartyUseCase,
  },
  domain::auth::SessionVerifier,
  domain::billing::{BillingService, BillingServiceConfig, GstRate, IssuerProfile},
  domain::party::PartyService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresBillRepository, PostgresChallanRepository, PostgresCounterStore,
      PostgresPartyRepository, PostgresSessionStore,
    },
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billbook=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting billbook");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let party_repo = Arc::new(PostgresPartyRepository::new(db_pool.clone()));
  let bill_repo = Arc::new(PostgresBillRepository::new(db_pool.clone()));
  let challan_repo = Arc::new(PostgresChallanRepository::new(db_pool.clone()));
  let counter_store = Arc::new(PostgresCounterStore::new(db_pool.clone()));
  let session_verifier: Arc<dyn SessionVerifier> =
    Arc::new(PostgresSessionStore::new(db_pool.clone()));

  // Initialize domain services
  let issuer = IssuerProfile {
    name: config.issuer.name.clone(),
    gstin: config.issuer.gstin.clone(),
    address: config.issuer.address.clone(),
    city: config.issuer.city.clone(),
    state: config.issuer.state.clone(),
    pincode: config.issuer.pincode.clone(),
    mobile_no: config.issuer.mobile_no.clone(),
    email: config.issuer.email.clone(),
  };

  let default_gst_rate = Decimal::try_from(config.billing.default_gst_rate)
    .ok()
    .and_then(|rate| GstRate::new(rate).ok())
    .expect("Invalid billing.default_gst_rate in configuration");

  let party_service = Arc::new(PartyService::new(party_repo.clone()));
  let billing_service = Arc::new(BillingService::new(
    bill_repo.clone(),
    challan_repo.clone(),
    party_repo.clone(),
    counter_store.clone(),
    BillingServiceConfig {
      issuer,
      default_gst_rate,
      allocation_timeout: Duration::from_secs(config.billing.allocation_timeout_seconds),
    },
  ));

  // Initialize party use cases
  let create_party_use_case = Arc::new(CreatePartyUseCase::new(party_service.clone()));
  let list_parties_use_case = Arc::new(ListPartiesUseCase::new(party_service.clone()));
  let get_party_use_case = Arc::new(GetPartyUseCase::new(party_service.clone()));
  let update_party_use_case = Arc::new(UpdatePartyUseCase::new(party_service.clone()));
  let delete_party_use_case = Arc::new(DeletePartyUseCase::new(party_service.clone()));

  // Initialize bill use cases
  let create_bill_use_case = Arc::new(CreateBillUseCase::new(billing_service.clone()));
  let list_bills_use_case = Arc::new(ListBillsUseCase::new(billing_service.clone()));
  let get_bill_use_case = Arc::new(GetBillUseCase::new(billing_service.clone()));
  let get_bill_document_use_case = Arc::new(GetBillDocumentUseCase::new(billing_service.clone()));
  let update_bill_use_case = Arc::new(UpdateBillUseCase::new(billing_service.clone()));
  let delete_bill_use_case = Arc::new(DeleteBillUseCase::new(billing_service.clone()));
  let record_payment_use_case = Arc::new(RecordPaymentUseCase::new(billing_service.clone()));
  let remove_payment_use_case = Arc::new(RemovePaymentUseCase::new(billing_service.clone()));
  let cancel_bill_use_case = Arc::new(CancelBillUseCase::new(billing_service.clone()));

  // Initialize challan use cases
  let create_challan_use_case = Arc::new(CreateChallanUseCase::new(billing_service.clone()));
  let list_challans_use_case = Arc::new(ListChallansUseCase::new(billing_service.clone()));
  let get_challan_use_case = Arc::new(GetChallanUseCase::new(billing_service.clone()));
  let get_challan_document_use_case =
    Arc::new(GetChallanDocumentUseCase::new(billing_service.clone()));
  let update_challan_use_case = Arc::new(UpdateChallanUseCase::new(billing_service.clone()));
  let delete_challan_use_case = Arc::new(DeleteChallanUseCase::new(billing_service.clone()));
  let convert_challan_use_case = Arc::new(ConvertChallanUseCase::new(billing_service.clone()));

  // Initialize numbering use case
  let peek_next_number_use_case = Arc::new(PeekNextNumberUseCase::new(billing_service.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure party API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/parties")
          .wrap(AuthMiddleware::new(session_verifier.clone()))
          .configure(|cfg| {
            configure_party_routes(
              cfg,
              create_party_use_case.clone(),
              list_parties_use_case.clone(),
              get_party_use_case.clone(),
              update_party_use_case.clone(),
              delete_party_use_case.clone(),
            )
          }),
      )
      // Configure bill API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/bills")
          .wrap(AuthMiddleware::new(session_verifier.clone()))
          .configure(|cfg| {
            configure_bill_routes(
              cfg,
              create_bill_use_case.clone(),
              list_bills_use_case.clone(),
              get_bill_use_case.clone(),
              get_bill_document_use_case.clone(),
              update_bill_use_case.clone(),
              delete_bill_use_case.clone(),
              record_payment_use_case.clone(),
              remove_payment_use_case.clone(),
              cancel_bill_use_case.clone(),
            )
          }),
      )
      // Configure challan API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/challans")
          .wrap(AuthMiddleware::new(session_verifier.clone()))
          .configure(|cfg| {
            configure_challan_routes(
              cfg,
              create_challan_use_case.clone(),
              list_challans_use_case.clone(),
              get_challan_use_case.clone(),
              get_challan_document_use_case.clone(),
              update_challan_use_case.clone(),
              delete_challan_use_case.clone(),
              convert_challan_use_case.clone(),
            )
          }),
      )
      // Configure numbering preview routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/numbers")
          .wrap(AuthMiddleware::new(session_verifier.clone()))
          .configure(|cfg| {
            configure_numbering_routes(cfg, peek_next_number_use_case.clone())
          }),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
