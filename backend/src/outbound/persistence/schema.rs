//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts. `username` and `email` carry unique indexes.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        /// Stored lower-cased.
        email -> Varchar,
        /// Encoded one-way credential.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Questions with their ordered answer references.
    questions (id) {
        id -> Uuid,
        title -> Varchar,
        body -> Text,
        author_id -> Uuid,
        votes -> Int8,
        tags -> Array<Text>,
        /// Append-only, creation order.
        answer_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers with their ordered comment references.
    answers (id) {
        id -> Uuid,
        question_id -> Uuid,
        body -> Text,
        author_id -> Uuid,
        votes -> Int8,
        /// Append-only, creation order.
        comment_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Leaf comments on answers.
    comments (id) {
        id -> Uuid,
        answer_id -> Uuid,
        body -> Text,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(questions -> users (author_id));
diesel::joinable!(answers -> questions (question_id));
diesel::joinable!(comments -> answers (answer_id));

diesel::allow_tables_to_appear_in_same_query!(users, questions, answers, comments);
