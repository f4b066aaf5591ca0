//! Car repository implementation
//!
//! Cars and their optional owner are stored in `cars` and `owners`. Reads
//! join the two so a car comes back with its owner in one row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const SELECT_CAR: &str = r#"
    SELECT
        c.car_id,
        c.vin,
        c.make,
        c.model,
        c.year_of_manufacture,
        o.owner_id AS "owner_id",
        o.name AS "owner_name",
        o.email AS "owner_email"
    FROM cars c
    LEFT JOIN owners o ON o.owner_id = c.owner_id
"#;

/// Repository for cars and owners
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a car by its identifier
    pub async fn get_by_id(&self, car_id: Uuid) -> Result<Option<CarRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(&format!("{SELECT_CAR} WHERE c.car_id = $1"))
            .bind(car_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Retrieves a car by its normalized VIN
    pub async fn find_by_vin(&self, vin: &str) -> Result<Option<CarRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(&format!("{SELECT_CAR} WHERE c.vin = $1"))
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Lists every car in registration order
    pub async fn list_all(&self) -> Result<Vec<CarRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CarRow>(&format!(
            "{SELECT_CAR} ORDER BY c.created_at, c.car_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a car, creating its owner first when one is given
    ///
    /// Both writes share a transaction. A VIN collision surfaces as
    /// `DatabaseError::DuplicateEntry` from the `UNIQUE (vin)` constraint.
    pub async fn insert(&self, car: &NewCarRecord) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        if let Some(owner) = &car.owner {
            sqlx::query(
                r#"
                INSERT INTO owners (owner_id, name, email)
                VALUES ($1, $2, $3)
                ON CONFLICT (owner_id) DO NOTHING
                "#,
            )
            .bind(owner.owner_id)
            .bind(&owner.name)
            .bind(&owner.email)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO cars (car_id, vin, make, model, year_of_manufacture, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(car.car_id)
        .bind(&car.vin)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(car.owner.as_ref().map(|o| o.owner_id))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Database row for a car joined with its owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarRow {
    pub car_id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: Option<Uuid>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

/// Data for inserting a car
#[derive(Debug, Clone)]
pub struct NewCarRecord {
    pub car_id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner: Option<OwnerRecord>,
}

/// Data for inserting an owner
#[derive(Debug, Clone)]
pub struct OwnerRecord {
    pub owner_id: Uuid,
    pub name: String,
    pub email: Option<String>,
}
