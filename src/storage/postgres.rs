//! Postgres adapter. Predicates and orderings are rendered into SQL with
//! `QueryBuilder`; every value is bound, only static column names are pushed.

use crate::domain::query::predicate::{Condition, OrderKey, Predicate, Test};
use crate::domain::query::{FieldKind, FieldValue, SortDirection};
use crate::storage::{schema, Record, Storage, Transaction};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn apply_schema(&self) -> anyhow::Result<()> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!(statements = schema::STATEMENTS.len(), "schema applied");
        Ok(())
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FieldValue, kind: FieldKind) {
    match value {
        FieldValue::Integer(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Decimal(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Text(v) => {
            qb.push_bind(v.clone());
        }
        FieldValue::Boolean(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Timestamp(v) => {
            qb.push_bind(*v);
        }
        FieldValue::Null => match kind {
            FieldKind::Integer => {
                qb.push_bind(None::<i64>);
            }
            FieldKind::Decimal => {
                qb.push_bind(None::<f64>);
            }
            FieldKind::Text => {
                qb.push_bind(None::<String>);
            }
            FieldKind::Boolean => {
                qb.push_bind(None::<bool>);
            }
            FieldKind::Timestamp => {
                qb.push_bind(None::<DateTime<Utc>>);
            }
        },
    }
}

fn push_condition<R: Record>(qb: &mut QueryBuilder<'_, Postgres>, condition: &Condition<R>) {
    let kind = R::fields()
        .kind_of(condition.column)
        .unwrap_or(FieldKind::Text);
    qb.push(condition.column);
    match &condition.test {
        Test::Compare(cmp, value) => {
            qb.push(" ").push(cmp.sql()).push(" ");
            push_value(qb, value, kind);
        }
        Test::Contains(needle) => {
            qb.push(" LIKE ")
                .push_bind(format!("%{}%", escape_like(needle)))
                .push(" ESCAPE '\\'");
        }
        Test::Between(lower, upper) => {
            qb.push(" BETWEEN ");
            push_value(qb, lower, kind);
            qb.push(" AND ");
            push_value(qb, upper, kind);
        }
    }
}

fn push_predicate<R: Record>(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate<R>) {
    match predicate {
        Predicate::True => {
            qb.push("TRUE");
        }
        Predicate::Condition(condition) => push_condition(qb, condition),
        Predicate::And(parts) => {
            qb.push("(");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    qb.push(" AND ");
                }
                push_predicate(qb, part);
            }
            qb.push(")");
        }
    }
}

fn push_where<R: Record>(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate<R>) {
    if !predicate.is_true() {
        qb.push(" WHERE ");
        push_predicate(qb, predicate);
    }
}

/// Requested keys first, then the primary key so pages never shift on ties.
fn push_order<R: Record>(qb: &mut QueryBuilder<'_, Postgres>, ordering: &[OrderKey<R>]) {
    qb.push(" ORDER BY ");
    for key in ordering {
        let direction = match key.direction {
            SortDirection::Asc => " ASC, ",
            SortDirection::Desc => " DESC, ",
        };
        qb.push(key.column).push(direction);
    }
    qb.push(R::fields().primary_key_column()).push(" ASC");
}

fn select_page<R: Record>(
    predicate: &Predicate<R>,
    ordering: &[OrderKey<R>],
    offset: i64,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", R::TABLE));
    push_where(&mut qb, predicate);
    push_order(&mut qb, ordering);
    qb.push(" LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);
    qb
}

fn select_count<R: Record>(predicate: &Predicate<R>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
    push_where(&mut qb, predicate);
    qb
}

fn select_by_id<R: Record>(id: i64, for_update: bool) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", R::TABLE));
    qb.push(R::fields().primary_key_column())
        .push(" = ")
        .push_bind(id);
    if for_update {
        qb.push(" FOR UPDATE");
    }
    qb
}

fn insert<R: Record>(record: &R) -> QueryBuilder<'static, Postgres> {
    let fields = R::fields();
    let mut qb = QueryBuilder::new(format!("INSERT INTO {} (", R::TABLE));
    let mut columns = qb.separated(", ");
    for field in fields.data_fields() {
        columns.push(field.column);
    }
    qb.push(") VALUES (");
    for (i, field) in fields.data_fields().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(&mut qb, &(field.get)(record), field.kind);
    }
    qb.push(") RETURNING *");
    qb
}

fn update<R: Record>(id: i64, record: &R) -> QueryBuilder<'static, Postgres> {
    let fields = R::fields();
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", R::TABLE));
    for (i, field) in fields.data_fields().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(field.column).push(" = ");
        push_value(&mut qb, &(field.get)(record), field.kind);
    }
    qb.push(" WHERE ")
        .push(fields.primary_key_column())
        .push(" = ")
        .push_bind(id)
        .push(" RETURNING *");
    qb
}

#[async_trait]
impl Storage for PgStorage {
    type Tx = PgTransaction;

    async fn find_page<R: Record>(
        &self,
        predicate: &Predicate<R>,
        ordering: &[OrderKey<R>],
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<R>> {
        let mut qb = select_page(predicate, ordering, offset, limit);
        Ok(qb.build_query_as::<R>().fetch_all(&self.pool).await?)
    }

    async fn count<R: Record>(&self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        let mut qb = select_count(predicate);
        Ok(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?)
    }

    async fn find_by_id<R: Record>(&self, id: i64) -> anyhow::Result<Option<R>> {
        let mut qb = select_by_id::<R>(id, false);
        Ok(qb.build_query_as::<R>().fetch_optional(&self.pool).await?)
    }

    async fn begin(&self) -> anyhow::Result<PgTransaction> {
        Ok(PgTransaction {
            tx: self.pool.begin().await?,
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn find_by_id<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        let mut qb = select_by_id::<R>(id, false);
        Ok(qb.build_query_as::<R>().fetch_optional(&mut *self.tx).await?)
    }

    async fn find_for_update<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        let mut qb = select_by_id::<R>(id, true);
        Ok(qb.build_query_as::<R>().fetch_optional(&mut *self.tx).await?)
    }

    async fn count<R: Record>(&mut self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        let mut qb = select_count(predicate);
        Ok(qb.build_query_scalar::<i64>().fetch_one(&mut *self.tx).await?)
    }

    async fn save<R: Record>(&mut self, record: R) -> anyhow::Result<R> {
        let mut qb = match record.id() {
            None => insert(&record),
            Some(id) => update(id, &record),
        };
        qb.build_query_as::<R>()
            .fetch_optional(&mut *self.tx)
            .await?
            .ok_or_else(|| anyhow!("{} row {:?} does not exist", R::TABLE, record.id()))
    }

    async fn commit(self) -> anyhow::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> anyhow::Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{translate, translate_sort, FilterDescriptor, Operator, SortDescriptor};
    use crate::storage::records::MenuItemRecord;

    fn item() -> MenuItemRecord {
        MenuItemRecord {
            id: None,
            restaurant_id: Some(1),
            name: "Pastel".to_string(),
            description: String::new(),
            price: 10.0,
            dine_in_only: false,
            photo_path: None,
        }
    }

    #[test]
    fn renders_conditions_and_tiebreak() {
        let filters = [
            FilterDescriptor::new("name", "50%_off", Operator::Like).unwrap(),
            FilterDescriptor::new("price", "10,20", Operator::Between).unwrap(),
            FilterDescriptor::new("dine_in_only", "false", Operator::Equals).unwrap(),
        ];
        let predicate = translate(MenuItemRecord::fields(), &filters).unwrap();
        let ordering =
            translate_sort(MenuItemRecord::fields(), &[SortDescriptor::desc("price").unwrap()])
                .unwrap();
        let qb = select_page(&predicate, &ordering, 20, 10);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM menu_items WHERE (name LIKE $1 ESCAPE '\\' AND price BETWEEN $2 AND $3 \
             AND dine_in_only = $4) ORDER BY price DESC, id ASC LIMIT $5 OFFSET $6"
        );
    }

    #[test]
    fn empty_predicate_has_no_where_clause() {
        let qb = select_count::<MenuItemRecord>(&Predicate::True);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM menu_items");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn insert_and_update_cover_every_data_column() {
        let qb = insert(&item());
        assert_eq!(
            qb.sql(),
            "INSERT INTO menu_items (restaurant_id, name, description, price, dine_in_only, \
             photo_path) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        );
        let qb = update(7, &item());
        assert_eq!(
            qb.sql(),
            "UPDATE menu_items SET restaurant_id = $1, name = $2, description = $3, price = $4, \
             dine_in_only = $5, photo_path = $6 WHERE id = $7 RETURNING *"
        );
    }

    #[test]
    fn row_lock_is_requested_for_update_reads() {
        assert_eq!(
            select_by_id::<MenuItemRecord>(3, true).sql(),
            "SELECT * FROM menu_items WHERE id = $1 FOR UPDATE"
        );
    }
}
