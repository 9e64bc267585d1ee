use roster_data::{DataError, DataResult, Page, Pageable};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Address, Student, StudentInput, StudentRecord, StudentRow};

const STUDENT_COLUMNS: &str = "id, name, dob, email, phone, created_at, updated_at";

/// Student and address persistence. Every write touches both rows inside
/// one transaction; dropping the transaction on an early return rolls it back.
#[derive(Clone)]
pub struct StudentService {
    pool: SqlitePool,
}

impl StudentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Newest students first, joined with their address.
    pub async fn list(&self, pageable: &Pageable) -> DataResult<Page<StudentRecord>> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        let total = u64::try_from(total.0).unwrap_or(0);

        let offset = pageable.offset();
        if offset >= total {
            return Ok(Page::new(Vec::new(), pageable, total));
        }

        let sql = format!("{} ORDER BY s.id DESC LIMIT ? OFFSET ?", StudentRow::SELECT);
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(i64::try_from(pageable.size).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let content = rows.into_iter().map(StudentRow::into_record).collect();
        Ok(Page::new(content, pageable, total))
    }

    pub async fn find(&self, id: i64) -> DataResult<StudentRecord> {
        let sql = format!("{} WHERE s.id = ?", StudentRow::SELECT);
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(StudentRow::into_record)
            .ok_or_else(|| DataError::NotFound(format!("Student {id} not found")))
    }

    /// Like [`find`](Self::find), but the address must exist.
    pub async fn find_with_address(&self, id: i64) -> DataResult<(Student, Address)> {
        self.find(id).await?.require_address()
    }

    pub async fn create(&self, input: &StudentInput) -> DataResult<Student> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO students (name, dob, email, phone) VALUES (?, ?, ?, ?) \
             RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&input.name)
            .bind(input.dob)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(&mut *tx)
            .await?;

        let address = &input.address;
        sqlx::query(
            "INSERT INTO addresses (student_id, line_1, line_2, city, state, country, pincode) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(student.id)
        .bind(&address.line_1)
        .bind(&address.line_2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .bind(&address.pincode)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(student_id = student.id, "student created");
        Ok(student)
    }

    pub async fn update(&self, id: i64, input: &StudentInput) -> DataResult<Student> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE students SET name = ?, dob = ?, email = ?, phone = ?, \
             updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&input.name)
            .bind(input.dob)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DataError::NotFound(format!("Student {id} not found")))?;

        let address = &input.address;
        let result = sqlx::query(
            "UPDATE addresses SET line_1 = ?, line_2 = ?, city = ?, state = ?, country = ?, \
             pincode = ?, updated_at = CURRENT_TIMESTAMP WHERE student_id = ?",
        )
        .bind(&address.line_1)
        .bind(&address.line_2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .bind(&address.pincode)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DataError::Integrity(format!("student {id} has no address")));
        }

        tx.commit().await?;
        info!(student_id = id, "student updated");
        Ok(student)
    }

    pub async fn delete(&self, id: i64) -> DataResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM addresses WHERE student_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DataError::NotFound(format!("Student {id} not found")));
        }

        tx.commit().await?;
        info!(student_id = id, "student deleted");
        Ok(())
    }
}
