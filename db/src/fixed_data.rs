//! Records every fresh store starts with.

use chrono::{DateTime, TimeZone, Utc};
use frit_common::views::UserStatus;

use crate::models::DbUser;

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn seed(id: u64, name: &str, email: &str, phone: &str, status: UserStatus) -> DbUser {
    // Seed records were created one per day, in id order.
    let at = day(u32::try_from(id).unwrap_or(1));

    DbUser {
        id,
        name: name.into(),
        email: email.into(),
        phone: Some(phone.into()),
        status,
        created_at: at,
        updated_at: at,
    }
}

pub fn seed_users() -> Vec<DbUser> {
    vec![
        seed(1, "Nguyễn Văn A", "nguyenvana@example.com", "0123456789", UserStatus::Active),
        seed(2, "Trần Thị B", "tranthib@example.com", "0987654321", UserStatus::Active),
        seed(3, "Lê Văn C", "levanc@example.com", "0555666777", UserStatus::Inactive),
    ]
}
