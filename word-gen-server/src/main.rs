use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use env_logger::Env;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use word_gen_core::io::{corpus_path, list_corpora, read_corpus, validate_corpus_name};
use word_gen_core::{Chain, ChainConfig, GenerationConfig, Tokenizer};

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_words: Option<usize>,
	seed: Option<u64>, // reproducible output when set
}

/// Query parameters of the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainQuery {
	names: Option<String>,
	max_depth: Option<usize>,
	ignore_case: Option<bool>,
}

/// Mutable state shared by all workers
struct SharedData {
	chain: Chain,
	corpus_names: Vec<String>,
}

/// Read-only settings resolved at startup
struct Settings {
	data_folder: PathBuf,
}

impl GenerateParams {
	fn generation_config(&self) -> Result<GenerationConfig, String> {
		match self.max_words {
			None => Ok(GenerationConfig::default()),
			Some(max_words) => GenerationConfig::new(max_words).map_err(|e| e.to_string()),
		}
	}
}

impl TrainQuery {
	fn chain_config(&self) -> ChainConfig {
		let defaults = ChainConfig::default();
		ChainConfig::new(
			self.max_depth.unwrap_or(defaults.max_depth),
			self.ignore_case.unwrap_or(defaults.ignore_case),
		)
	}

	/// Splits `names` on commas. Every name must stay inside the data folder.
	fn corpus_names(&self) -> Result<Vec<&str>, String> {
		let names = match &self.names {
			Some(s) if !s.trim().is_empty() => s.trim(),
			_ => return Err("Missing or empty corpus name".to_owned()),
		};

		names
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(|name| validate_corpus_name(name).map_err(|e| e.to_string()))
			.collect()
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one line from the currently trained chain.
/// Returns the words joined by spaces as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let config = match query.generation_config() {
		Ok(config) => config,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	if !shared_data.chain.is_trained() {
		return HttpResponse::Conflict().body("No corpus trained yet");
	}

	let line = match query.seed {
		Some(seed) => shared_data.chain.generate_line(&config, &mut StdRng::seed_from_u64(seed)),
		None => shared_data.chain.generate_line(&config, &mut rand::rng()),
	};
	HttpResponse::Ok().body(line)
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus files available in the data folder.
#[get("/v1/corpora")]
async fn get_corpora(settings: web::Data<Settings>) -> impl Responder {
	match list_corpora(&settings.data_folder) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			warn!("Failed to list {}: {e}", settings.data_folder.display());
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

/// HTTP GET endpoint `/v1/loaded_corpora`
///
/// Lists the corpora the current chain was trained on.
#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpus_names.join("\n"))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains a fresh chain on the comma separated corpora in `names`,
/// then replaces the current one.
#[put("/v1/train")]
async fn put_train(
	data: web::Data<Mutex<SharedData>>,
	settings: web::Data<Settings>,
	query: web::Query<TrainQuery>,
) -> impl Responder {
	let names = match query.corpus_names() {
		Ok(names) => names,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let tokenizer = Tokenizer::default();
	let mut chain = Chain::new(query.chain_config());
	for name in &names {
		let path = match corpus_path(&settings.data_folder, name) {
			Ok(path) => path,
			Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
		};
		match read_corpus(&path, &tokenizer) {
			Ok(lines) => chain.train(&lines),
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}")),
		}
	}
	info!("Trained {} lines from {}", chain.lines_trained(), names.join(", "));

	// Swap only once training succeeded, so readers never see a partial chain
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	shared_data.chain = chain;
	shared_data.corpus_names = names.iter().map(|name| (*name).to_owned()).collect();

	HttpResponse::Ok().body("Corpora trained successfully")
}

/// Main entry point for the server.
///
/// Wraps an untrained chain in a `Mutex`, so training and generation never
/// overlap, and starts an Actix-web HTTP server.
///
/// # Notes
/// - Binds to `WORD_GEN_BIND` (default `127.0.0.1:5000`).
/// - Corpora are read from `WORD_GEN_DATA` (default `./data`).
/// - Log level follows `RUST_LOG` (default `info`).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let bind = env::var("WORD_GEN_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	let data_folder = PathBuf::from(env::var("WORD_GEN_DATA").unwrap_or_else(|_| "data".to_owned()));
	info!("Serving corpora from {} on {bind}", data_folder.display());

	let shared_data = SharedData {
		chain: Chain::default(),
		corpus_names: Vec::new(),
	};
	let shared_chain = web::Data::new(Mutex::new(shared_data));
	let settings = web::Data::new(Settings { data_folder });

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_chain.clone())
			.app_data(settings.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(put_train)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	fn train_query(names: Option<&str>) -> TrainQuery {
		TrainQuery { names: names.map(str::to_owned), max_depth: None, ignore_case: None }
	}

	#[test]
	fn corpus_names_are_trimmed_and_split() {
		let query = train_query(Some(" poems , ,songs,"));
		assert_eq!(query.corpus_names(), Ok(vec!["poems", "songs"]));
	}

	#[test]
	fn names_leaving_the_data_folder_are_rejected() {
		for names in ["../../home/user/notes", "poems,../secret", "/etc/passwd", "nested/poems", "..\\win", ".hidden"] {
			assert!(train_query(Some(names)).corpus_names().is_err(), "{names:?} accepted");
		}
	}

	#[test]
	fn missing_corpus_names_are_rejected() {
		assert!(train_query(None).corpus_names().is_err());
		assert!(train_query(Some("   ")).corpus_names().is_err());
	}

	#[test]
	fn chain_config_falls_back_to_defaults() {
		let mut query = train_query(Some("poems"));
		assert_eq!(query.chain_config(), ChainConfig::default());

		query.max_depth = Some(4);
		query.ignore_case = Some(true);
		assert_eq!(query.chain_config(), ChainConfig::new(4, true));
	}

	#[test]
	fn zero_max_words_is_a_bad_request() {
		let params = GenerateParams { max_words: Some(0), seed: None };
		assert!(params.generation_config().is_err());

		let params = GenerateParams { max_words: None, seed: Some(1) };
		assert_eq!(params.generation_config(), Ok(GenerationConfig::default()));
	}
}
