//! Car DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CarId, OwnerId};
use domain_car::{Car, Owner};

use crate::validation::validate_owner_name;

/// A car with its owner flattened into `owner*` fields
///
/// The owner fields are `null` for a car without an owner.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: CarId,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: Option<OwnerId>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        let (owner_id, owner_name, owner_email) = match car.owner {
            Some(owner) => (Some(owner.id), Some(owner.name), owner.email),
            None => (None, None, None),
        };

        Self {
            id: car.id,
            vin: car.vin.to_string(),
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id,
            owner_name,
            owner_email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    #[validate(custom(function = "validate_owner_name"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
}

impl From<OwnerRequest> for Owner {
    fn from(owner: OwnerRequest) -> Self {
        Owner::new(owner.name.trim(), owner.email)
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCarRequest {
    #[validate(length(equal = 17))]
    pub vin: String,
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner: Option<OwnerRequest>,
}

/// Query string of the insurance validity check
#[derive(Debug, Deserialize)]
pub struct InsuranceValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceValidityResponse {
    pub car_id: CarId,
    pub date: NaiveDate,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_car::NewCar;

    #[test]
    fn test_owner_is_flattened() {
        let owner = Owner::new("Ana Pop", Some("ana@example.com".to_string()));
        let owner_id = owner.id;
        let car = NewCar::new("UU1HSDADG52112345", "Dacia", "Logan", 2018, Some(owner))
            .unwrap()
            .into_car();

        let json = serde_json::to_value(CarResponse::from(car)).unwrap();
        assert_eq!(json["ownerId"], serde_json::to_value(owner_id).unwrap());
        assert_eq!(json["ownerName"], "Ana Pop");
        assert_eq!(json["ownerEmail"], "ana@example.com");
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn test_car_without_owner_has_null_owner_fields() {
        let car = NewCar::new("WVWZZZ1KZ7W123456", "Volkswagen", "Golf", 2021, None)
            .unwrap()
            .into_car();

        let json = serde_json::to_value(CarResponse::from(car)).unwrap();
        assert!(json["ownerId"].is_null());
        assert!(json["ownerName"].is_null());
        assert!(json["ownerEmail"].is_null());
    }

    #[test]
    fn test_blank_owner_name_is_rejected() {
        let blank = OwnerRequest {
            name: "   ".to_string(),
            email: None,
        };
        assert!(blank.validate().unwrap_err().field_errors().contains_key("name"));

        let padded = OwnerRequest {
            name: "  Ana Pop  ".to_string(),
            email: None,
        };
        assert!(padded.validate().is_ok());
        assert_eq!(Owner::from(padded).name, "Ana Pop");
    }
}
