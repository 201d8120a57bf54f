use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;

use crate::domain::access::AccessScope;
use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::ContactNumber;
use crate::domain::customer::models::CountryCode;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerFilters;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPatch;
use crate::domain::customer::models::CustomerStatus;
use crate::domain::customer::models::NewCustomer;
use crate::domain::customer::models::PersonName;
use crate::domain::customer::ports::CustomerRepository;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;

const CUSTOMER_COLUMNS: &str = "id, owner_id, first_name, last_name, email, country_code, \
     contact_number, designation, company_name, business_address, nature_of_business, \
     latitude, longitude, area, remarks, status, tapped, created_at, updated_at";

pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: &PgRow) -> Result<Customer, CustomerError> {
        let status: String = row.try_get("status").map_err(database_error)?;
        let status = CustomerStatus::from_str(&status)
            .map_err(|e| CustomerError::DatabaseError(format!("Unexpected stored status: {}", e)))?;

        Ok(Customer {
            id: CustomerId(row.try_get("id").map_err(database_error)?),
            owner_id: IdentityId(row.try_get("owner_id").map_err(database_error)?),
            first_name: row.try_get("first_name").map_err(database_error)?,
            last_name: row.try_get("last_name").map_err(database_error)?,
            email: row.try_get("email").map_err(database_error)?,
            country_code: row.try_get("country_code").map_err(database_error)?,
            contact_number: row.try_get("contact_number").map_err(database_error)?,
            designation: row.try_get("designation").map_err(database_error)?,
            company_name: row.try_get("company_name").map_err(database_error)?,
            business_address: row.try_get("business_address").map_err(database_error)?,
            nature_of_business: row.try_get("nature_of_business").map_err(database_error)?,
            latitude: row.try_get("latitude").map_err(database_error)?,
            longitude: row.try_get("longitude").map_err(database_error)?,
            area: row.try_get("area").map_err(database_error)?,
            remarks: row.try_get("remarks").map_err(database_error)?,
            status,
            tapped: row.try_get("tapped").map_err(database_error)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
            updated_at: row.try_get("updated_at").map_err(database_error)?,
        })
    }

    fn push_scope(query: &mut QueryBuilder<'_, Postgres>, scope: &AccessScope) {
        if let AccessScope::OwnedBy(owner_id) = scope {
            query.push(" AND owner_id = ").push_bind(owner_id.0);
        }
    }
}

fn database_error(e: sqlx::Error) -> CustomerError {
    CustomerError::DatabaseError(e.to_string())
}

/// Escape `LIKE` wildcards so user input only ever matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// A column assignment of an `UPDATE ... SET` built from a patch.
enum ColumnValue {
    Text(Option<String>),
    Float(Option<f64>),
    Bool(bool),
}

fn column_changes(patch: &CustomerPatch) -> Vec<(&'static str, ColumnValue)> {
    fn text<T>(value: &Option<T>, f: fn(&T) -> &str) -> ColumnValue {
        ColumnValue::Text(value.as_ref().map(|v| f(v).to_string()))
    }

    let mut changes = Vec::new();

    if let Some(value) = &patch.first_name {
        changes.push(("first_name", text(value, PersonName::as_str)));
    }
    if let Some(value) = &patch.last_name {
        changes.push(("last_name", text(value, PersonName::as_str)));
    }
    if let Some(value) = &patch.email {
        changes.push(("email", text(value, EmailAddress::as_str)));
    }
    if let Some(value) = &patch.country_code {
        changes.push(("country_code", text(value, CountryCode::as_str)));
    }
    if let Some(value) = &patch.contact_number {
        changes.push(("contact_number", text(value, ContactNumber::as_str)));
    }
    if let Some(value) = &patch.designation {
        changes.push(("designation", ColumnValue::Text(value.clone())));
    }
    if let Some(value) = &patch.company_name {
        changes.push((
            "company_name",
            ColumnValue::Text(Some(value.as_str().to_string())),
        ));
    }
    if let Some(value) = &patch.business_address {
        changes.push((
            "business_address",
            ColumnValue::Text(Some(value.as_str().to_string())),
        ));
    }
    if let Some(value) = &patch.nature_of_business {
        changes.push(("nature_of_business", ColumnValue::Text(value.clone())));
    }
    if let Some(value) = patch.latitude {
        changes.push(("latitude", ColumnValue::Float(value.map(|l| l.value()))));
    }
    if let Some(value) = patch.longitude {
        changes.push(("longitude", ColumnValue::Float(value.map(|l| l.value()))));
    }
    if let Some(value) = &patch.area {
        changes.push(("area", ColumnValue::Text(value.clone())));
    }
    if let Some(value) = &patch.remarks {
        changes.push(("remarks", ColumnValue::Text(value.clone())));
    }
    if let Some(status) = patch.status {
        changes.push((
            "status",
            ColumnValue::Text(Some(status.as_str().to_string())),
        ));
    }
    if let Some(tapped) = patch.tapped {
        changes.push(("tapped", ColumnValue::Bool(tapped)));
    }

    changes
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, CustomerError> {
        let sql = format!(
            r#"
            INSERT INTO customers (
                owner_id, first_name, last_name, email, country_code, contact_number,
                designation, company_name, business_address, nature_of_business,
                latitude, longitude, area, remarks, status, tapped
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        );
        let fields = &customer.fields;

        let row = sqlx::query(&sql)
            .bind(customer.owner_id.0)
            .bind(fields.first_name.as_ref().map(|v| v.as_str()))
            .bind(fields.last_name.as_ref().map(|v| v.as_str()))
            .bind(fields.email.as_ref().map(|v| v.as_str()))
            .bind(fields.country_code.as_ref().map(|v| v.as_str()))
            .bind(fields.contact_number.as_ref().map(|v| v.as_str()))
            .bind(fields.designation.as_deref())
            .bind(fields.company_name.as_str())
            .bind(fields.business_address.as_str())
            .bind(fields.nature_of_business.as_deref())
            .bind(fields.latitude.map(|v| v.value()))
            .bind(fields.longitude.map(|v| v.value()))
            .bind(fields.area.as_deref())
            .bind(fields.remarks.as_deref())
            .bind(fields.status.as_str())
            .bind(fields.tapped)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Self::row_to_customer(&row)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        let sql = format!("SELECT {} FROM customers WHERE id = $1", CUSTOMER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_customer).transpose()
    }

    async fn find_all(
        &self,
        scope: &AccessScope,
        filters: &CustomerFilters,
    ) -> Result<Vec<Customer>, CustomerError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM customers WHERE TRUE",
            CUSTOMER_COLUMNS
        ));

        Self::push_scope(&mut query, scope);

        if let Some(status) = filters.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(tapped) = filters.tapped {
            query.push(" AND tapped = ").push_bind(tapped);
        }
        if let Some(area) = &filters.area {
            query.push(" AND area = ").push_bind(area.clone());
        }
        if let Some(search) = &filters.search {
            let pattern = like_pattern(search);
            query
                .push(" AND (company_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        query.push(" ORDER BY created_at DESC, id DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(Self::row_to_customer).collect()
    }

    async fn list_areas(&self, scope: &AccessScope) -> Result<Vec<String>, CustomerError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT DISTINCT area FROM customers WHERE area IS NOT NULL AND area <> ''",
        );

        Self::push_scope(&mut query, scope);
        query.push(" ORDER BY area");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter()
            .map(|row| row.try_get("area").map_err(database_error))
            .collect()
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, CustomerError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE customers SET ");

        {
            let mut assignments = query.separated(", ");
            for (column, value) in column_changes(patch) {
                assignments.push(format!("{} = ", column));
                match value {
                    ColumnValue::Text(value) => assignments.push_bind_unseparated(value),
                    ColumnValue::Float(value) => assignments.push_bind_unseparated(value),
                    ColumnValue::Bool(value) => assignments.push_bind_unseparated(value),
                };
            }
            assignments.push("updated_at = NOW()");
        }

        query
            .push(" WHERE id = ")
            .push_bind(id.0)
            .push(format!(" RETURNING {}", CUSTOMER_COLUMNS));

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_customer).transpose()
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
