use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// A live (not soft-deleted) user row.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    #[diesel(column_name = user_id)]
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub bio: String,
    pub profile_picture: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration input as received from a client, password in plain text.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub bio: String,
    pub profile_picture: String,
}

/// Row written by `UserRepository::create`; the id is generated by the repository.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub bio: String,
    pub profile_picture: String,
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// Login lookup result.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCredentials {
    #[diesel(column_name = user_id)]
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}
