//! Repositorio genérico de CRUD
//!
//! Un único repositorio sirve a todas las tablas. Cada escritura corre en
//! una transacción: verificación de existencia, verificación de claves
//! foráneas, la sentencia y la relectura de la fila se confirman o
//! descartan juntas.

use std::fmt;
use std::marker::PhantomData;

use sqlx::{PgConnection, PgPool, Row};
use tracing::{debug, info};

use super::entity::{Draft, Entity, Key, Reference, SqlValue};
use crate::database::{classify, Operation};
use crate::utils::errors::{AppError, AppResult};

pub struct CrudRepository<E: Entity> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> CrudRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Todas las filas, en el orden declarado por el esquema
    pub async fn list(&self) -> AppResult<Vec<E>> {
        let sql = list_sql::<E>();
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        debug!("📋 {} filas en {}", rows.len(), E::SCHEMA.table);
        Ok(rows)
    }

    pub async fn find_by_id(&self, key: &E::Key) -> AppResult<Option<E>> {
        let sql = select_one_sql::<E>();
        let row = key
            .to_value()
            .bind(sqlx::query(&sql))
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(E::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Igual que `find_by_id`, pero una fila ausente es un 404
    pub async fn get(&self, key: &E::Key) -> AppResult<E> {
        self.find_by_id(key)
            .await?
            .ok_or_else(|| AppError::NotFound(not_found_message::<E>(key)))
    }

    pub async fn create<D: Draft>(&self, draft: &D) -> AppResult<E> {
        let schema = &E::SCHEMA;
        let columns = draft.columns();
        let mut tx = self.pool.begin().await?;

        // Clave natural (VIN): un duplicado se reporta con su valor
        if let Some((_, key_value)) = columns.iter().find(|(c, _)| *c == schema.key_column) {
            if exists(&mut *tx, schema.table, schema.key_column, key_value.clone()).await? {
                return Err(AppError::Integrity(format!(
                    "{} with {} {} already exists",
                    schema.label, schema.key_label, key_value
                )));
            }
        }
        check_references(&mut *tx, &draft.references()).await?;

        let names: Vec<&'static str> = columns.iter().map(|(c, _)| *c).collect();
        let sql = insert_sql(schema.table, &names, schema.key_column);
        let mut query = sqlx::query(&sql);
        for (_, value) in columns {
            query = value.bind(query);
        }
        let row = query
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| classify(e, Operation::Write, schema.label))?;
        let key = <E::Key as Key>::from_row(&row, schema.key_column)?;

        let entity = fetch_in::<E>(&mut *tx, &key).await?;
        tx.commit().await?;

        info!("✅ {} {} creado", schema.label, key);
        Ok(entity)
    }

    /// Reemplaza la fila completa. La clave nunca se modifica.
    pub async fn update<D: Draft>(&self, key: &E::Key, draft: &D) -> AppResult<E> {
        let schema = &E::SCHEMA;
        let columns: Vec<(&'static str, SqlValue)> = draft
            .columns()
            .into_iter()
            .filter(|(c, _)| *c != schema.key_column)
            .collect();
        if columns.is_empty() {
            return Err(AppError::BadRequest("No data provided".to_string()));
        }

        let mut tx = self.pool.begin().await?;
        if !exists(&mut *tx, schema.table, schema.key_column, key.to_value()).await? {
            return Err(AppError::NotFound(not_found_message::<E>(key)));
        }
        check_references(&mut *tx, &draft.references()).await?;

        let names: Vec<&'static str> = columns.iter().map(|(c, _)| *c).collect();
        let sql = update_sql(schema.table, &names, schema.key_column);
        let mut query = sqlx::query(&sql);
        for (_, value) in columns {
            query = value.bind(query);
        }
        key.to_value()
            .bind(query)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify(e, Operation::Write, schema.label))?;

        let entity = fetch_in::<E>(&mut *tx, key).await?;
        tx.commit().await?;

        info!("✏️ {} {} actualizado", schema.label, key);
        Ok(entity)
    }

    pub async fn delete(&self, key: &E::Key) -> AppResult<()> {
        let schema = &E::SCHEMA;
        let mut tx = self.pool.begin().await?;
        if !exists(&mut *tx, schema.table, schema.key_column, key.to_value()).await? {
            return Err(AppError::NotFound(not_found_message::<E>(key)));
        }

        let sql = delete_sql(schema.table, schema.key_column);
        key.to_value()
            .bind(sqlx::query(&sql))
            .execute(&mut *tx)
            .await
            .map_err(|e| classify(e, Operation::Delete, schema.label))?;
        tx.commit().await?;

        info!("🗑️ {} {} eliminado", schema.label, key);
        Ok(())
    }
}

/// Mensaje 404 de una entidad; `key` puede ser el segmento de ruta sin interpretar
pub fn not_found_message<E: Entity>(key: &dyn fmt::Display) -> String {
    format!(
        "{} with {} {} not found",
        E::SCHEMA.label,
        E::SCHEMA.key_label,
        key
    )
}

async fn exists(
    conn: &mut PgConnection,
    table: &str,
    column: &str,
    value: SqlValue,
) -> Result<bool, sqlx::Error> {
    let sql = exists_sql(table, column);
    let row = value.bind(sqlx::query(&sql)).fetch_one(&mut *conn).await?;
    row.try_get::<bool, _>(0)
}

async fn check_references(conn: &mut PgConnection, references: &[Reference]) -> AppResult<()> {
    for reference in references {
        if !exists(conn, reference.table, reference.column, reference.value.clone()).await? {
            return Err(AppError::InvalidReference(reference.missing_message()));
        }
    }
    Ok(())
}

async fn fetch_in<E: Entity>(conn: &mut PgConnection, key: &E::Key) -> AppResult<E> {
    let sql = select_one_sql::<E>();
    let row = key
        .to_value()
        .bind(sqlx::query(&sql))
        .fetch_one(&mut *conn)
        .await?;
    Ok(E::from_row(&row)?)
}

fn list_sql<E: Entity>() -> String {
    format!("{} ORDER BY {}", E::SCHEMA.select, E::SCHEMA.order_by)
}

fn select_one_sql<E: Entity>() -> String {
    format!("{} WHERE {} = $1", E::SCHEMA.select, E::SCHEMA.key_filter)
}

fn exists_sql(table: &str, column: &str) -> String {
    format!("SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)", table, column)
}

fn insert_sql(table: &str, columns: &[&str], returning: &str) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        columns.join(", "),
        placeholders.join(", "),
        returning
    )
}

fn update_sql(table: &str, columns: &[&str], key_column: &str) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        table,
        assignments.join(", "),
        key_column,
        columns.len() + 1
    )
}

fn delete_sql(table: &str, key_column: &str) -> String {
    format!("DELETE FROM {} WHERE {} = $1", table, key_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{customer::Customer, ride::Ride, vehicle::Vehicle};

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql("customer", &["customer_name", "phone_number", "email"], "customer_id"),
            "INSERT INTO customer (customer_name, phone_number, email) VALUES ($1, $2, $3) RETURNING customer_id"
        );
    }

    #[test]
    fn test_update_sql_binds_key_last() {
        assert_eq!(
            update_sql("vehicle", &["model", "color"], "vehicle_vin"),
            "UPDATE vehicle SET model = $1, color = $2 WHERE vehicle_vin = $3"
        );
    }

    #[test]
    fn test_exists_and_delete_sql() {
        assert_eq!(
            exists_sql("driver", "driver_id"),
            "SELECT EXISTS(SELECT 1 FROM driver WHERE driver_id = $1)"
        );
        assert_eq!(
            delete_sql("rating", "rating_id"),
            "DELETE FROM rating WHERE rating_id = $1"
        );
    }

    #[test]
    fn test_select_sql_uses_schema() {
        assert!(list_sql::<Ride>().ends_with("ORDER BY r.ride_id DESC"));
        assert!(select_one_sql::<Vehicle>().ends_with("WHERE v.vehicle_vin = $1"));
        assert!(list_sql::<Customer>().starts_with("SELECT customer_id"));
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            not_found_message::<Customer>(&42),
            "Customer with ID 42 not found"
        );
        assert_eq!(
            not_found_message::<Vehicle>(&"VIN-1".to_string()),
            "Vehicle with VIN VIN-1 not found"
        );
    }
}
