//! Car Domain Ports
//!
//! The `CarPort` trait defines everything the car domain (and the coverage,
//! claim and history services that need to confirm a car exists) requires
//! from the car store.
//!
//! - **Internal Adapter**: PostgreSQL (infra_db)
//! - **Mock Adapter**: in-memory, behind the `mock` feature
//!
//! ```rust,ignore
//! use domain_car::CarPort;
//! use std::sync::Arc;
//!
//! let cars: Arc<dyn CarPort> = Arc::new(PostgresCarAdapter::new(pool));
//! let car = cars.find_car(car_id).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::car::{Car, NewCar, Vin};

/// The port trait for car storage
///
/// Finders return `Ok(None)` for a missing car so callers can decide which
/// domain error to raise.
#[async_trait]
pub trait CarPort: DomainPort + HealthCheckable {
    /// Retrieves a car by ID
    async fn find_car(&self, id: CarId) -> Result<Option<Car>, PortError>;

    /// Retrieves a car by VIN
    async fn find_by_vin(&self, vin: &Vin) -> Result<Option<Car>, PortError>;

    /// Lists all cars
    async fn list_cars(&self) -> Result<Vec<Car>, PortError>;

    /// Persists a new car
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` when the VIN is already taken.
    async fn save_car(&self, car: NewCar) -> Result<Car, PortError>;
}

/// Extension trait for CarPort with convenience methods
#[async_trait]
pub trait CarPortExt: CarPort {
    /// Returns true if a car with this ID exists
    async fn car_exists(&self, id: CarId) -> Result<bool, PortError> {
        Ok(self.find_car(id).await?.is_some())
    }
}

impl<T: CarPort + ?Sized> CarPortExt for T {}

/// Mock implementation of CarPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    /// In-memory car store preserving insertion order
    #[derive(Debug, Default, Clone)]
    pub struct MockCarPort {
        cars: Arc<RwLock<Vec<Car>>>,
    }

    impl MockCarPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with cars for testing
        pub async fn with_cars(cars: Vec<Car>) -> Self {
            let port = Self::new();
            port.cars.write().await.extend(cars);
            port
        }
    }

    impl DomainPort for MockCarPort {}

    #[async_trait]
    impl HealthCheckable for MockCarPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-car-port", 0)
        }
    }

    #[async_trait]
    impl CarPort for MockCarPort {
        async fn find_car(&self, id: CarId) -> Result<Option<Car>, PortError> {
            Ok(self.cars.read().await.iter().find(|c| c.id == id).cloned())
        }

        async fn find_by_vin(&self, vin: &Vin) -> Result<Option<Car>, PortError> {
            Ok(self.cars.read().await.iter().find(|c| &c.vin == vin).cloned())
        }

        async fn list_cars(&self) -> Result<Vec<Car>, PortError> {
            Ok(self.cars.read().await.clone())
        }

        async fn save_car(&self, car: NewCar) -> Result<Car, PortError> {
            let mut cars = self.cars.write().await;
            if cars.iter().any(|c| c.vin == car.vin) {
                return Err(PortError::conflict(format!("VIN {} already exists", car.vin)));
            }
            let car = car.into_car();
            cars.push(car.clone());
            Ok(car)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockCarPort;

    fn new_car(vin: &str) -> NewCar {
        NewCar::new(vin, "Dacia", "Logan", 2019, None).unwrap()
    }

    #[tokio::test]
    async fn test_mock_port_save_and_find() {
        let port = MockCarPort::new();
        let car = port.save_car(new_car("UU1LSDAAH12345678")).await.unwrap();

        let found = port.find_car(car.id).await.unwrap();
        assert_eq!(found, Some(car.clone()));

        let by_vin = port.find_by_vin(&car.vin).await.unwrap();
        assert_eq!(by_vin.map(|c| c.id), Some(car.id));
    }

    #[tokio::test]
    async fn test_mock_port_missing_car_is_none() {
        let port = MockCarPort::new();
        assert!(port.find_car(CarId::new()).await.unwrap().is_none());
        assert!(!port.car_exists(CarId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_port_rejects_duplicate_vin() {
        let port = MockCarPort::new();
        port.save_car(new_car("UU1LSDAAH12345678")).await.unwrap();

        let err = port.save_car(new_car("uu1lsdaah12345678")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_port_lists_in_insertion_order() {
        let port = MockCarPort::new();
        let first = port.save_car(new_car("UU1LSDAAH12345678")).await.unwrap();
        let second = port.save_car(new_car("WVWZZZ1JZXW000001")).await.unwrap();

        let ids: Vec<_> = port.list_cars().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_mock_port_health_check() {
        let port = MockCarPort::new();
        assert!(port.health_check().await.is_healthy());
    }
}
