//! `Record` implementations: the insert and full-row update statement of each table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::candidate::{CandidatePatch, CandidateRow, NewCandidate};
use crate::models::client::{ClientPatch, ClientRow, NewClient};
use crate::models::client_invoice::{ClientInvoicePatch, ClientInvoiceRow, NewClientInvoice};
use crate::models::invoice::{InvoicePatch, InvoiceRow, NewInvoice};
use crate::models::open_role::{
    CvSubmissionPatch, CvSubmissionRow, NewCvSubmission, NewOpenRole, OpenRolePatch, OpenRoleRow,
};
use crate::models::transaction::{NewTransaction, TransactionPatch, TransactionRow};
use crate::models::user::{NewUser, UserPatch, UserRow};
use crate::records::Record;

#[async_trait]
impl Record for ClientRow {
    const TABLE: &'static str = "clients";
    const LABEL: &'static str = "Client";

    type New = NewClient;
    type Patch = ClientPatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: ClientPatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    async fn insert(pool: &PgPool, new: &NewClient) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, ClientRow>(
            r#"
            INSERT INTO clients
                (name, client_mgr, client_email, client_addr, client_phone, payment_freq, client_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.client_mgr)
        .bind(&new.client_email)
        .bind(&new.client_addr)
        .bind(&new.client_phone)
        .bind(&new.payment_freq)
        .bind(&new.client_type)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, ClientRow>(
            r#"
            UPDATE clients
            SET name = $2, client_mgr = $3, client_email = $4, client_addr = $5,
                client_phone = $6, payment_freq = $7, client_type = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.client_mgr)
        .bind(&self.client_email)
        .bind(&self.client_addr)
        .bind(&self.client_phone)
        .bind(&self.payment_freq)
        .bind(&self.client_type)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for CandidateRow {
    const TABLE: &'static str = "candidates";
    const LABEL: &'static str = "Candidate";

    type New = NewCandidate;
    type Patch = CandidatePatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: CandidatePatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    async fn insert(pool: &PgPool, new: &NewCandidate) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates
                (name, role, location, candidate_cost, phone, email, feedback, cv_link, status, client_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.role)
        .bind(&new.location)
        .bind(new.candidate_cost)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.feedback)
        .bind(&new.cv_link)
        .bind(&new.status)
        .bind(new.client_id)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates
            SET name = $2, role = $3, location = $4, candidate_cost = $5, phone = $6,
                email = $7, feedback = $8, cv_link = $9, status = $10, client_id = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.role)
        .bind(&self.location)
        .bind(self.candidate_cost)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.feedback)
        .bind(&self.cv_link)
        .bind(&self.status)
        .bind(self.client_id)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for TransactionRow {
    const TABLE: &'static str = "transactions";
    const LABEL: &'static str = "Transaction";

    type New = NewTransaction;
    type Patch = TransactionPatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: TransactionPatch) -> Result<Self, AppError> {
        self.merged(patch)
    }

    async fn insert(pool: &PgPool, new: &NewTransaction) -> Result<Self, AppError> {
        new.validate()?;
        Ok(sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions
                (txn_date, candidate_id, client_id, recruiter_id, referral_id,
                 client_price, referral_price, recruiter_price, start_date, end_date,
                 num_payments_received, total_client_recv, total_recruiter_paid,
                 total_referral_paid, last_payment_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(new.txn_date)
        .bind(new.candidate_id)
        .bind(new.client_id)
        .bind(new.recruiter_id)
        .bind(new.referral_id)
        .bind(new.client_price)
        .bind(new.referral_price)
        .bind(new.recruiter_price)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.num_payments_received)
        .bind(new.total_client_recv)
        .bind(new.total_recruiter_paid)
        .bind(new.total_referral_paid)
        .bind(new.last_payment_date)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, TransactionRow>(
            r#"
            UPDATE transactions
            SET txn_date = $2, candidate_id = $3, client_id = $4, recruiter_id = $5,
                referral_id = $6, client_price = $7, referral_price = $8,
                recruiter_price = $9, start_date = $10, end_date = $11,
                num_payments_received = $12, total_client_recv = $13,
                total_recruiter_paid = $14, total_referral_paid = $15,
                last_payment_date = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.txn_date)
        .bind(self.candidate_id)
        .bind(self.client_id)
        .bind(self.recruiter_id)
        .bind(self.referral_id)
        .bind(self.client_price)
        .bind(self.referral_price)
        .bind(self.recruiter_price)
        .bind(self.start_date)
        .bind(self.end_date)
        .bind(self.num_payments_received)
        .bind(self.total_client_recv)
        .bind(self.total_recruiter_paid)
        .bind(self.total_referral_paid)
        .bind(self.last_payment_date)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for InvoiceRow {
    const TABLE: &'static str = "invoices";
    const LABEL: &'static str = "Invoice";

    type New = NewInvoice;
    type Patch = InvoicePatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: InvoicePatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    async fn insert(pool: &PgPool, new: &NewInvoice) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, InvoiceRow>(
            r#"
            INSERT INTO invoices
                (inv_date, candidate_id, period_start, period_end, txn_id,
                 hours_worked, inv_value, inv_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.inv_date)
        .bind(new.candidate_id)
        .bind(new.period_start)
        .bind(new.period_end)
        .bind(new.txn_id)
        .bind(new.hours_worked)
        .bind(new.inv_value)
        .bind(&new.inv_status)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, InvoiceRow>(
            r#"
            UPDATE invoices
            SET inv_date = $2, candidate_id = $3, period_start = $4, period_end = $5,
                txn_id = $6, hours_worked = $7, inv_value = $8, inv_status = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.inv_date)
        .bind(self.candidate_id)
        .bind(self.period_start)
        .bind(self.period_end)
        .bind(self.txn_id)
        .bind(self.hours_worked)
        .bind(self.inv_value)
        .bind(&self.inv_status)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for ClientInvoiceRow {
    const TABLE: &'static str = "client_invoices";
    const LABEL: &'static str = "Client invoice";
    const LIST_ORDER: &'static str = "inv_date DESC, id DESC";

    type New = NewClientInvoice;
    type Patch = ClientInvoicePatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: ClientInvoicePatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    /// Raw insert without rendering; `client-invoices/submit` is the full flow.
    async fn insert(pool: &PgPool, new: &NewClientInvoice) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, ClientInvoiceRow>(
            r#"
            INSERT INTO client_invoices
                (inv_date, due_date, period_start, period_end, client_id, client_name,
                 client_contact, client_email, client_addr, client_phone, explain_str,
                 inv_value, inv_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(new.inv_date)
        .bind(new.due_date)
        .bind(new.period_start)
        .bind(new.period_end)
        .bind(new.client_id)
        .bind(&new.client_name)
        .bind(&new.client_contact)
        .bind(&new.client_email)
        .bind(&new.client_addr)
        .bind(&new.client_phone)
        .bind(&new.explain_str)
        .bind(new.inv_value)
        .bind(&new.inv_status)
        .fetch_one(pool)
        .await?)
    }

    /// `inv_hash` is not part of the statement.
    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, ClientInvoiceRow>(
            r#"
            UPDATE client_invoices
            SET inv_date = $2, due_date = $3, period_start = $4, period_end = $5,
                client_id = $6, client_name = $7, client_contact = $8, client_email = $9,
                client_addr = $10, client_phone = $11, explain_str = $12, inv_html = $13,
                inv_value = $14, inv_status = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.inv_date)
        .bind(self.due_date)
        .bind(self.period_start)
        .bind(self.period_end)
        .bind(self.client_id)
        .bind(&self.client_name)
        .bind(&self.client_contact)
        .bind(&self.client_email)
        .bind(&self.client_addr)
        .bind(&self.client_phone)
        .bind(&self.explain_str)
        .bind(&self.inv_html)
        .bind(self.inv_value)
        .bind(&self.inv_status)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for OpenRoleRow {
    const TABLE: &'static str = "open_roles";
    const LABEL: &'static str = "Open role";

    type New = NewOpenRole;
    type Patch = OpenRolePatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: OpenRolePatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    async fn insert(pool: &PgPool, new: &NewOpenRole) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, OpenRoleRow>(
            r#"
            INSERT INTO open_roles
                (client_id, role_desc, location, status, posted_on, remote,
                 job_desc_link, test_doc, jd_doc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.client_id)
        .bind(&new.role_desc)
        .bind(&new.location)
        .bind(&new.status)
        .bind(new.posted_on)
        .bind(&new.remote)
        .bind(&new.job_desc_link)
        .bind(&new.test_doc)
        .bind(&new.jd_doc)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, OpenRoleRow>(
            r#"
            UPDATE open_roles
            SET client_id = $2, role_desc = $3, location = $4, status = $5, posted_on = $6,
                remote = $7, job_desc_link = $8, test_doc = $9, jd_doc = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.client_id)
        .bind(&self.role_desc)
        .bind(&self.location)
        .bind(&self.status)
        .bind(self.posted_on)
        .bind(&self.remote)
        .bind(&self.job_desc_link)
        .bind(&self.test_doc)
        .bind(&self.jd_doc)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for CvSubmissionRow {
    const TABLE: &'static str = "submit_cv_role";
    const LABEL: &'static str = "CV submission";

    type New = NewCvSubmission;
    type Patch = CvSubmissionPatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: CvSubmissionPatch) -> Result<Self, AppError> {
        Ok(self.merged(patch))
    }

    async fn insert(pool: &PgPool, new: &NewCvSubmission) -> Result<Self, AppError> {
        Ok(sqlx::query_as::<_, CvSubmissionRow>(
            r#"
            INSERT INTO submit_cv_role
                (client_id, open_roles_id, candidates_id, status, submitted_on, remote,
                 cv_link, test_answers, test_score, match_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.client_id)
        .bind(new.open_roles_id)
        .bind(new.candidates_id)
        .bind(&new.status)
        .bind(new.submitted_on)
        .bind(&new.remote)
        .bind(&new.cv_link)
        .bind(&new.test_answers)
        .bind(&new.test_score)
        .bind(&new.match_score)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, CvSubmissionRow>(
            r#"
            UPDATE submit_cv_role
            SET client_id = $2, open_roles_id = $3, candidates_id = $4, status = $5,
                submitted_on = $6, remote = $7, cv_link = $8, test_answers = $9,
                test_score = $10, match_score = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.client_id)
        .bind(self.open_roles_id)
        .bind(self.candidates_id)
        .bind(&self.status)
        .bind(self.submitted_on)
        .bind(&self.remote)
        .bind(&self.cv_link)
        .bind(&self.test_answers)
        .bind(&self.test_score)
        .bind(&self.match_score)
        .fetch_optional(pool)
        .await?)
    }
}

#[async_trait]
impl Record for UserRow {
    const TABLE: &'static str = "users";
    const LABEL: &'static str = "User";

    type New = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> i32 {
        self.id
    }

    fn apply_patch(self, patch: UserPatch) -> Result<Self, AppError> {
        self.merged(patch)
    }

    async fn insert(pool: &PgPool, new: &NewUser) -> Result<Self, AppError> {
        let password_hash = new.password_hash()?;
        Ok(sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, msg_id, role, password, client_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.msg_id)
        .bind(&new.role)
        .bind(password_hash)
        .bind(new.client_id)
        .fetch_one(pool)
        .await?)
    }

    async fn update(&self, pool: &PgPool) -> Result<Option<Self>, AppError> {
        Ok(sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $2, email = $3, msg_id = $4, role = $5, password = $6, client_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.msg_id)
        .bind(&self.role)
        .bind(&self.password)
        .bind(self.client_id)
        .fetch_optional(pool)
        .await?)
    }
}
