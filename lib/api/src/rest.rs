use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use foodans_core::{DietPreference, Error, PriceBand, Query, RatingBand, ValueRange};
use foodans_recommend::Engine;
use serde::Deserialize;
use std::sync::Arc;

/// Area value meaning "search where the user already is"
pub const SAME_AREA: &str = "Same";

#[derive(Deserialize)]
struct DietParams {
    #[serde(default)]
    diet: DietPreference,
}

#[derive(Deserialize)]
struct VendorParams {
    category: Option<String>,
}

#[derive(Deserialize)]
struct TopSellerParams {
    category: String,
    #[serde(default)]
    diet: DietPreference,
}

#[derive(Deserialize)]
struct SearchRequest {
    /// Area to search; `"Same"` or absent means `home_area`
    area: Option<String>,
    home_area: Option<String>,
    category: Option<String>,
    #[serde(default)]
    diet: DietPreference,
    price: Option<ValueRange>,
    price_band: Option<PriceBand>,
    rating: Option<ValueRange>,
    rating_band: Option<RatingBand>,
}

impl SearchRequest {
    fn into_query(self) -> Query {
        let area = match self.area {
            Some(area) if area != SAME_AREA => Some(area),
            _ => self.home_area,
        };
        let price = self
            .price
            .or_else(|| self.price_band.map(PriceBand::range))
            .unwrap_or_default();
        let rating = self
            .rating
            .or_else(|| self.rating_band.map(RatingBand::range))
            .unwrap_or_default();

        Query {
            area,
            category: self.category,
            diet: self.diet,
            price,
            rating,
        }
    }
}

#[derive(Deserialize)]
struct WhatNextRequest {
    category: String,
    area: String,
    #[serde(default)]
    diet: DietPreference,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<Engine>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register every route; the engine must be provided as app data
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/areas", web::get().to(list_areas))
            .route("/areas/{area}/top-vendors", web::get().to(area_top_vendors))
            .route("/areas/{area}/vendors", web::get().to(area_vendors))
            .route("/categories", web::get().to(list_categories))
            .route("/categories/{category}/areas", web::get().to(category_areas))
            .route("/vendors", web::get().to(list_vendors))
            .route("/vendors/{name}", web::get().to(get_vendor))
            .route("/vendors/{name}/top-seller", web::get().to(vendor_top_seller))
            .route("/vendors/{name}/dishes", web::get().to(vendor_dishes))
            .route("/next/{category}", web::get().to(next_categories))
            .route("/search", web::post().to(search))
            .route("/what-next", web::post().to(what_next));
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::CategoryNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("{} not found", what)
    }))
}

async fn health(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "items": engine.catalog().len(),
    })))
}

async fn list_areas(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": engine.catalog().areas() })))
}

async fn list_categories(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": engine.catalog().categories() })))
}

async fn list_vendors(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": engine.catalog().vendors() })))
}

async fn category_areas(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let category = path.into_inner();
    if !engine.catalog().has_category(&category) {
        return Ok(not_found("Category"));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": engine.catalog().areas_with_category(&category)
    })))
}

async fn area_top_vendors(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
    params: web::Query<DietParams>,
) -> ActixResult<HttpResponse> {
    let area = path.into_inner();
    let vendors = engine.top_vendors(&area, params.diet);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": vendors })))
}

async fn area_vendors(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
    params: web::Query<DietParams>,
) -> ActixResult<HttpResponse> {
    let area = path.into_inner();
    let board = engine.area_board(&area, params.diet);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": board })))
}

async fn get_vendor(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
    params: web::Query<VendorParams>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    match engine.vendor_profile(&name, params.category.as_deref()) {
        Some(profile) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": profile }))),
        None => Ok(not_found("Vendor")),
    }
}

async fn vendor_top_seller(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
    params: web::Query<TopSellerParams>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    if engine.catalog().by_vendor(&name).is_empty() {
        return Ok(not_found("Vendor"));
    }
    match engine.browse_vendor(&name, &params.category, params.diet) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": outcome }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn vendor_dishes(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
    params: web::Query<DietParams>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    let dishes = engine.dish_breakdown(&name, params.diet);
    if dishes.is_empty() && engine.catalog().by_vendor(&name).is_empty() {
        return Ok(not_found("Vendor"));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": dishes })))
}

async fn next_categories(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let category = path.into_inner();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": engine.next_categories(&category)
    })))
}

async fn search(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let query = req.into_inner().into_query();
    match engine.search(&query) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": outcome }))),
        Err(e) => {
            tracing::debug!("Search failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

async fn what_next(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<WhatNextRequest>,
) -> ActixResult<HttpResponse> {
    match engine.what_next(&req.category, &req.area, req.diet) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": outcome }))),
        Err(e) => Ok(error_response(&e)),
    }
}
