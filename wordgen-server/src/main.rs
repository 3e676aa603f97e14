use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use log::{error, info};
use serde::Deserialize;
use wordgen_core::io::{list_files, normalize_folder};
use wordgen_core::{GenError, GenerationInput, Inventory, WordGenerator};

/// Extension of inventory files in the data folder.
const INVENTORY_EXTENSION: &str = "inv";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	syllables: i64,
	number: Option<usize>,
	random: Option<bool>,
	conjugate: Option<bool>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct CountParams {
	syllables: i64,
}

#[derive(Deserialize)]
struct InventoryQuery {
	name: Option<String>,
}

struct SharedData {
	generator: WordGenerator,
	data_folder: PathBuf,
}

impl GenerateParams {
	fn input(&self) -> GenerationInput {
		GenerationInput {
			syllables: self.syllables,
			number: self.number,
			random: self.random.unwrap_or(false),
			seed: self.seed,
			conjugate: self.conjugate.unwrap_or(false),
		}
	}
}

/// Maps a generation error to an HTTP response.
///
/// Invalid input is a 400, a resource limit a 413, anything else a 500.
fn error_response(e: GenError) -> HttpResponse {
	match e {
		GenError::InvalidSyllables(_) | GenError::InvalidInventory(_) => HttpResponse::BadRequest().body(e.to_string()),
		_ if e.is_resource_limit() => HttpResponse::PayloadTooLarge().body(e.to_string()),
		_ => {
			error!("{e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates words with the loaded inventory based on query parameters.
/// Returns one word (or conjugation line) per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.produce(&query.input()) {
		Ok(lines) => HttpResponse::Ok().body(lines.join("\n")),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/count`
///
/// Returns how many words `/v1/generate` would produce before truncation.
#[get("/v1/count")]
async fn get_count(data: web::Data<Mutex<SharedData>>, query: web::Query<CountParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.count(query.syllables) {
		Ok(count) => HttpResponse::Ok().body(count.to_string()),
		Err(e) => error_response(e),
	}
}

#[get("/v1/inventories")]
async fn get_inventories(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.data_folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	match list_files(&folder, INVENTORY_EXTENSION) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list inventories"),
	}
}

#[get("/v1/inventory")]
async fn get_inventory(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.inventory().name().to_owned())
}

#[put("/v1/inventory")]
async fn put_inventory(data: web::Data<Mutex<SharedData>>, query: web::Query<InventoryQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty inventory name"),
	};

	if name == "default" {
		shared_data.generator = WordGenerator::new(Inventory::default());
		return HttpResponse::Ok().body("Inventory loaded successfully");
	}

	if name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid inventory name");
	}

	let path = shared_data.data_folder.join(format!("{name}.{INVENTORY_EXTENSION}"));
	match Inventory::load(&path) {
		Ok(inventory) => {
			info!("loaded inventory '{}' from {}", inventory.name(), path.display());
			shared_data.generator = WordGenerator::new(inventory);
			HttpResponse::Ok().body("Inventory loaded successfully")
		}
		Err(GenError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => HttpResponse::NotFound().body(format!("Unknown inventory: {name}")),
		Err(e) => error_response(e),
	}
}

/// Registers every endpoint on an app.
fn routes(config: &mut web::ServiceConfig) {
	config
		.service(get_generated)
		.service(get_count)
		.service(get_inventories)
		.service(get_inventory)
		.service(put_inventory);
}

/// Main entry point for the server.
///
/// Starts with the built-in inventory, wraps the generator in a `Mutex`,
/// and serves the endpoints above.
///
/// # Configuration
/// - `WORDGEN_BIND`: address to bind (default `127.0.0.1:5000`)
/// - `WORDGEN_DATA`: folder holding `.inv` inventories (default `./data`)
/// - `RUST_LOG`: log filter
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let bind = std::env::var("WORDGEN_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	let data_folder = normalize_folder(&std::env::var("WORDGEN_DATA").unwrap_or_else(|_| "./data".to_owned()));

	let shared_data = SharedData {
		generator: WordGenerator::default(),
		data_folder,
	};
	let shared_generator = web::Data::new(Mutex::new(shared_data));

	info!("listening on {bind}");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(["GET", "PUT"]))
			.app_data(shared_generator.clone())
			.configure(routes)
	})
		.bind(bind)?
		.run()
		.await
}
