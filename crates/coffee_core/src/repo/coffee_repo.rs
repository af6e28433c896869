//! Coffee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `coffees` relation.
//! - Keep SQL text, parameter binding and row decoding inside this module.
//!
//! # Invariants
//! - Every operation executes exactly one statement; no transactions.
//! - Update/delete target `(cof_name, sup_id)` and are no-ops when nothing
//!   matches.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::DbError;
use crate::model::coffee::{Coffee, CoffeeKey, SupplierId};
use log::{debug, warn};
use rusqlite::types::{FromSql, ValueRef};
use rusqlite::{named_params, Connection, ErrorCode, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const COFFEES_TABLE: &str = "coffees";
const COFFEES_COLUMNS: [&str; 5] = ["cof_name", "sup_id", "price", "sales", "total"];

const SELECT_BY_NAME_SQL: &str = "SELECT sup_id, price, sales, total
FROM coffees
WHERE cof_name = :cof_name
ORDER BY sup_id ASC
LIMIT 1;";

const SELECT_BY_KEY_SQL: &str = "SELECT sup_id, price, sales, total
FROM coffees
WHERE cof_name = :cof_name AND sup_id = :sup_id
LIMIT 1;";

const SELECT_ALL_SQL: &str = "SELECT cof_name, sup_id, price, sales, total
FROM coffees
ORDER BY cof_name ASC, sup_id ASC;";

const UPDATE_SQL: &str = "UPDATE coffees
SET price = :price, sales = :sales, total = :total
WHERE cof_name = :cof_name AND sup_id = :sup_id;";

const DELETE_SQL: &str = "DELETE FROM coffees WHERE cof_name = :cof_name AND sup_id = :sup_id;";

const INSERT_SQL: &str = "INSERT INTO coffees (cof_name, sup_id, price, sales, total)
VALUES (:cof_name, :sup_id, :price, :sales, :total);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for coffee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// The database file cannot be opened, read or written right now.
    StorageUnavailable(rusqlite::Error),
    /// A schema constraint rejected the write (e.g. duplicate natural key).
    ConstraintViolation(rusqlite::Error),
    /// Any other storage engine error, surfaced unchanged.
    Db(DbError),
    /// A persisted row cannot be decoded into `Coffee`.
    InvalidData(String),
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "coffee storage unavailable: {err}"),
            Self::ConstraintViolation(err) => write!(f, "coffee constraint violated: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted coffee data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "coffee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "coffee repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::ConstraintViolation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Self::ConstraintViolation(value),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::ReadOnly
                | ErrorCode::SystemIoFailure,
            ) => Self::StorageUnavailable(value),
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}

/// Repository interface for coffee CRUD operations.
pub trait CoffeeRepository {
    /// Gets the coffee named `name`, lowest `supplier_id` first.
    fn get(&self, name: &str) -> RepoResult<Option<Coffee>>;
    /// Gets the coffee identified by its full natural key.
    fn get_by_key(&self, key: CoffeeKey<'_>) -> RepoResult<Option<Coffee>>;
    /// Lists every coffee ordered by name then supplier.
    fn get_all(&self) -> RepoResult<Vec<Coffee>>;
    /// Overwrites price/sales/total of the row matching `coffee.key()`.
    fn update(&self, coffee: &Coffee) -> RepoResult<()>;
    /// Removes the row(s) matching `(name, supplier_id)`.
    fn delete(&self, name: &str, supplier_id: SupplierId) -> RepoResult<()>;
    /// Inserts a new row with all five fields.
    fn create(&self, coffee: &Coffee) -> RepoResult<()>;
}

/// SQLite-backed coffee repository borrowing a caller-owned connection.
pub struct SqliteCoffeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCoffeeRepository<'conn> {
    /// Constructs a repository after checking the `coffees` table shape.
    ///
    /// The schema is not created here; use `db::open_db` or provision the
    /// table externally.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_coffee_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CoffeeRepository for SqliteCoffeeRepository<'_> {
    fn get(&self, name: &str) -> RepoResult<Option<Coffee>> {
        let mut stmt = self.conn.prepare_cached(SELECT_BY_NAME_SQL)?;
        let mut rows = stmt.query(named_params! { ":cof_name": name })?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_keyed_coffee_row(name, row)?));
        }

        Ok(None)
    }

    fn get_by_key(&self, key: CoffeeKey<'_>) -> RepoResult<Option<Coffee>> {
        let mut stmt = self.conn.prepare_cached(SELECT_BY_KEY_SQL)?;
        let mut rows = stmt.query(named_params! {
            ":cof_name": key.name,
            ":sup_id": key.supplier_id,
        })?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_keyed_coffee_row(key.name, row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Coffee>> {
        let mut stmt = self.conn.prepare_cached(SELECT_ALL_SQL)?;
        let mut rows = stmt.query([])?;
        let mut coffees = Vec::new();

        while let Some(row) = rows.next()? {
            coffees.push(parse_coffee_row(row)?);
        }

        Ok(coffees)
    }

    fn update(&self, coffee: &Coffee) -> RepoResult<()> {
        let result = self.conn.execute(
            UPDATE_SQL,
            named_params! {
                ":price": price_to_db(coffee.price),
                ":sales": coffee.sales,
                ":total": coffee.total,
                ":cof_name": coffee.name.as_str(),
                ":sup_id": coffee.supplier_id,
            },
        );
        log_write("coffee_update", result)
    }

    fn delete(&self, name: &str, supplier_id: SupplierId) -> RepoResult<()> {
        let result = self.conn.execute(
            DELETE_SQL,
            named_params! {
                ":cof_name": name,
                ":sup_id": supplier_id,
            },
        );
        log_write("coffee_delete", result)
    }

    fn create(&self, coffee: &Coffee) -> RepoResult<()> {
        let result = self.conn.execute(
            INSERT_SQL,
            named_params! {
                ":cof_name": coffee.name.as_str(),
                ":sup_id": coffee.supplier_id,
                ":price": price_to_db(coffee.price),
                ":sales": coffee.sales,
                ":total": coffee.total,
            },
        );
        log_write("coffee_create", result)
    }
}

fn log_write(event: &str, result: rusqlite::Result<usize>) -> RepoResult<()> {
    match result {
        Ok(rows) => {
            debug!("event={event} module=repo status=ok rows={rows}");
            Ok(())
        }
        Err(err) => {
            let err = RepoError::from(err);
            warn!("event={event} module=repo status=error error={err}");
            Err(err)
        }
    }
}

/// Decodes `cof_name, sup_id, price, sales, total` (in that order).
fn parse_coffee_row(row: &Row<'_>) -> RepoResult<Coffee> {
    Ok(Coffee {
        name: read_column(row, 0, "cof_name")?,
        supplier_id: read_column(row, 1, "sup_id")?,
        price: read_price(row, 2)?,
        sales: read_column(row, 3, "sales")?,
        total: read_column(row, 4, "total")?,
    })
}

/// Decodes `sup_id, price, sales, total`; `name` comes from the lookup key.
fn parse_keyed_coffee_row(name: &str, row: &Row<'_>) -> RepoResult<Coffee> {
    Ok(Coffee {
        name: name.to_string(),
        supplier_id: read_column(row, 0, "sup_id")?,
        price: read_price(row, 1)?,
        sales: read_column(row, 2, "sales")?,
        total: read_column(row, 3, "total")?,
    })
}

fn read_column<T: FromSql>(row: &Row<'_>, index: usize, column: &str) -> RepoResult<T> {
    row.get(index).map_err(|err| match err {
        rusqlite::Error::InvalidColumnIndex(_)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::FromSqlConversionFailure(..) => {
            RepoError::InvalidData(format!("cannot read coffees.{column}: {err}"))
        }
        other => RepoError::from(other),
    })
}

fn read_price(row: &Row<'_>, index: usize) -> RepoResult<Decimal> {
    let value = row.get_ref(index).map_err(|err| {
        RepoError::InvalidData(format!("cannot read coffees.price: {err}"))
    })?;
    price_from_db(value)
}

fn price_to_db(price: Decimal) -> String {
    price.to_string()
}

// Rows written by other tools may hold the price as INTEGER or REAL.
fn price_from_db(value: ValueRef<'_>) -> RepoResult<Decimal> {
    match value {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|_| {
                RepoError::InvalidData("non utf-8 text in coffees.price".to_string())
            })?;
            parse_price_text(text.trim())
        }
        ValueRef::Integer(value) => Ok(Decimal::from(value)),
        ValueRef::Real(value) => parse_price_text(&value.to_string()),
        ValueRef::Null => Err(RepoError::InvalidData(
            "null value in coffees.price".to_string(),
        )),
        ValueRef::Blob(_) => Err(RepoError::InvalidData(
            "blob value in coffees.price".to_string(),
        )),
    }
}

fn parse_price_text(text: &str) -> RepoResult<Decimal> {
    Decimal::from_str(text).map_err(|err| {
        RepoError::InvalidData(format!("invalid price `{text}` in coffees.price: {err}"))
    })
}

fn ensure_coffee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let columns = table_columns(conn, COFFEES_TABLE)?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(COFFEES_TABLE));
    }

    for column in COFFEES_COLUMNS {
        if !columns
            .iter()
            .any(|current| current.eq_ignore_ascii_case(column))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: COFFEES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

// `pragma_table_info` resolves the name like a statement would: ASCII
// case-insensitive, temp schema before main. Empty means no such table.
fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get(0)?);
    }
    Ok(columns)
}
