//! Car domain services

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::CarId;

use crate::car::{Car, NewCar};
use crate::error::CarError;
use crate::ports::CarPort;

/// Service for listing, looking up and registering cars
#[derive(Clone)]
pub struct CarRegistry {
    cars: Arc<dyn CarPort>,
}

impl CarRegistry {
    pub fn new(cars: Arc<dyn CarPort>) -> Self {
        Self { cars }
    }

    /// Lists all registered cars
    pub async fn list_cars(&self) -> Result<Vec<Car>, CarError> {
        Ok(self.cars.list_cars().await?)
    }

    /// Retrieves a car or fails with `CarNotFound`
    pub async fn get_car(&self, car_id: CarId) -> Result<Car, CarError> {
        self.cars
            .find_car(car_id)
            .await?
            .ok_or(CarError::CarNotFound(car_id))
    }

    /// Registers a new car
    ///
    /// # Errors
    ///
    /// Returns `CarError::DuplicateVin` if the VIN is already registered,
    /// whether that is seen by the lookup or by the store's uniqueness
    /// constraint when a concurrent registration wins the race.
    #[instrument(skip(self, car), fields(vin = %car.vin))]
    pub async fn register_car(&self, car: NewCar) -> Result<Car, CarError> {
        if self.cars.find_by_vin(&car.vin).await?.is_some() {
            return Err(CarError::DuplicateVin(car.vin.to_string()));
        }

        let vin = car.vin.to_string();
        let saved = self.cars.save_car(car).await.map_err(|e| {
            if e.is_conflict() {
                CarError::DuplicateVin(vin)
            } else {
                CarError::Port(e)
            }
        })?;

        info!(car_id = %saved.id, "Car registered");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockCarPort;

    fn registry(port: MockCarPort) -> CarRegistry {
        CarRegistry::new(Arc::new(port))
    }

    fn new_car(vin: &str) -> NewCar {
        NewCar::new(vin, "Skoda", "Octavia", 2021, None).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_get() {
        let registry = registry(MockCarPort::new());

        let car = registry.register_car(new_car("TMBJJ7NE0L0123456")).await.unwrap();
        let fetched = registry.get_car(car.id).await.unwrap();

        assert_eq!(fetched, car);
        assert_eq!(registry.list_cars().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_vin_rejected() {
        let registry = registry(MockCarPort::new());
        registry.register_car(new_car("TMBJJ7NE0L0123456")).await.unwrap();

        let err = registry.register_car(new_car("tmbjj7ne0l0123456")).await.unwrap_err();
        assert!(matches!(err, CarError::DuplicateVin(vin) if vin == "TMBJJ7NE0L0123456"));
    }

    #[tokio::test]
    async fn test_get_unknown_car() {
        let registry = registry(MockCarPort::new());
        let id = CarId::new();

        let err = registry.get_car(id).await.unwrap_err();
        assert!(matches!(err, CarError::CarNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let registry = registry(MockCarPort::new());
        assert!(registry.list_cars().await.unwrap().is_empty());
    }
}
