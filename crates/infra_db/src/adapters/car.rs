//! PostgreSQL Car Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CarId, DomainPort, HealthCheckResult, HealthCheckable, OwnerId, PortError};
use domain_car::{Car, CarPort, NewCar, Owner, Vin};

use crate::error::DatabaseError;
use crate::repositories::car::{CarRepository, CarRow, NewCarRecord, OwnerRecord};

/// PostgreSQL-backed implementation of the CarPort trait
#[derive(Debug, Clone)]
pub struct PostgresCarAdapter {
    repository: CarRepository,
    pool: PgPool,
}

impl PostgresCarAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresCarAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCarAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-car-adapter").await
    }
}

#[async_trait]
impl CarPort for PostgresCarAdapter {
    #[instrument(skip(self), fields(car_id = %id))]
    async fn find_car(&self, id: CarId) -> Result<Option<Car>, PortError> {
        debug!("Fetching car by ID");

        let row = self.repository.get_by_id(*id.as_uuid()).await?;
        Ok(row.map(row_to_car).transpose()?)
    }

    #[instrument(skip(self), fields(vin = %vin))]
    async fn find_by_vin(&self, vin: &Vin) -> Result<Option<Car>, PortError> {
        let row = self.repository.find_by_vin(vin.as_str()).await?;
        Ok(row.map(row_to_car).transpose()?)
    }

    #[instrument(skip(self))]
    async fn list_cars(&self) -> Result<Vec<Car>, PortError> {
        let rows = self.repository.list_all().await?;
        debug!(count = rows.len(), "Listed cars");

        Ok(rows
            .into_iter()
            .map(row_to_car)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self, car), fields(vin = %car.vin))]
    async fn save_car(&self, car: NewCar) -> Result<Car, PortError> {
        let car = car.into_car();

        let record = NewCarRecord {
            car_id: *car.id.as_uuid(),
            vin: car.vin.to_string(),
            make: car.make.clone(),
            model: car.model.clone(),
            year_of_manufacture: car.year_of_manufacture,
            owner: car.owner.as_ref().map(|o| OwnerRecord {
                owner_id: *o.id.as_uuid(),
                name: o.name.clone(),
                email: o.email.clone(),
            }),
        };
        self.repository.insert(&record).await?;

        debug!(car_id = %car.id, "Car inserted");
        Ok(car)
    }
}

/// Converts a database car row to a domain Car
fn row_to_car(row: CarRow) -> Result<Car, DatabaseError> {
    let vin = Vin::parse(&row.vin).map_err(|e| DatabaseError::corrupt("cars", e))?;

    let owner = match (row.owner_id, row.owner_name) {
        (Some(owner_id), Some(name)) => Some(Owner {
            id: OwnerId::from_uuid(owner_id),
            name,
            email: row.owner_email,
        }),
        _ => None,
    };

    Ok(Car {
        id: CarId::from_uuid(row.car_id),
        vin,
        make: row.make,
        model: row.model,
        year_of_manufacture: row.year_of_manufacture,
        owner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(vin: &str) -> CarRow {
        CarRow {
            car_id: Uuid::new_v4(),
            vin: vin.to_string(),
            make: "Dacia".to_string(),
            model: "Duster".to_string(),
            year_of_manufacture: 2022,
            owner_id: None,
            owner_name: None,
            owner_email: None,
        }
    }

    #[test]
    fn test_row_to_car_without_owner() {
        let car = row_to_car(row("UU1HSDADG12345678")).unwrap();
        assert_eq!(car.vin.as_str(), "UU1HSDADG12345678");
        assert!(car.owner.is_none());
    }

    #[test]
    fn test_row_to_car_with_owner() {
        let mut r = row("UU1HSDADG12345678");
        r.owner_id = Some(Uuid::new_v4());
        r.owner_name = Some("Ion Popescu".to_string());
        r.owner_email = Some("ion@example.com".to_string());

        let owner = row_to_car(r).unwrap().owner.unwrap();
        assert_eq!(owner.name, "Ion Popescu");
        assert_eq!(owner.email.as_deref(), Some("ion@example.com"));
    }

    #[test]
    fn test_row_with_bad_vin_is_corrupt() {
        let err = row_to_car(row("BAD")).unwrap_err();
        assert!(matches!(err, DatabaseError::CorruptRow { table: "cars", .. }));
    }
}
