//! Car handlers
//!
//! Coverage checks, claim registration and history all hang off a car.

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};
use validator::Validate;

use core_kernel::{Amount, CarId, CoreError};
use domain_car::NewCar;
use domain_claims::{CarHistoryEvent, ClaimDescription};

use crate::dto::{
    CarResponse, ClaimResponse, InsuranceValidityQuery, InsuranceValidityResponse,
    RegisterCarRequest, RegisterClaimRequest,
};
use crate::{error::ApiError, AppState};

/// Lists all cars
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.cars.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Registers a car
#[instrument(skip(state, request), fields(vin = %request.vin))]
pub async fn register_car(
    State(state): State<AppState>,
    Json(request): Json<RegisterCarRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    if let Some(owner) = &request.owner {
        owner.validate()?;
    }

    let new_car = NewCar::new(
        &request.vin,
        request.make,
        request.model,
        request.year_of_manufacture,
        request.owner.map(Into::into),
    )
    .map_err(invalid)?;

    let car = state.cars.register_car(new_car).await?;
    let location = format!("/api/cars/{}", car.id.as_uuid());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CarResponse::from(car)),
    ))
}

/// Checks whether a car is insured on a date
#[instrument(skip(state, query))]
pub async fn insurance_valid(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
    Query(query): Query<InsuranceValidityQuery>,
) -> Result<Json<InsuranceValidityResponse>, ApiError> {
    let date = state.dates.validate_and_parse(query.date.as_deref())?;

    let valid = state
        .coverage
        .is_coverage_active(Some(car_id), Some(date))
        .await?;

    Ok(Json(InsuranceValidityResponse { car_id, date, valid }))
}

/// Registers a claim against a car's coverage
///
/// `claimDate`, `description` and `amount` come from the query string or an
/// urlencoded form body. A field present in both is taken from the query.
#[instrument(skip(state, query, form))]
pub async fn register_claim(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
    Query(query): Query<RegisterClaimRequest>,
    form: Option<Form<RegisterClaimRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.or(form.map(|Form(body)| body).unwrap_or_default());

    let claim_date = state.dates.validate_and_parse(request.claim_date.as_deref())?;
    request.validate()?;

    let description = ClaimDescription::parse(request.description.as_deref().unwrap_or_default())
        .map_err(invalid)?;
    let amount: Amount = request.amount.as_deref().unwrap_or_default().parse()?;

    let claim = state
        .claims
        .register_claim(car_id, claim_date, description, amount)
        .await?;

    info!(claim_id = %claim.id, "Claim created");
    let location = format!("/api/cars/{}/claims/{}", car_id.as_uuid(), claim.id.as_uuid());
    let car = state.cars.get_car(car_id).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClaimResponse::new(claim, &car)),
    ))
}

/// Returns a car's policy and claim timeline
pub async fn car_history(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
) -> Result<Json<Vec<CarHistoryEvent>>, ApiError> {
    Ok(Json(state.history.car_history(car_id).await?))
}

fn invalid(err: CoreError) -> ApiError {
    ApiError::BadRequest(err.to_string())
}
