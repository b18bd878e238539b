use crate::domain::model::{FieldValue, Record};

pub const SEED_COLUMNS: [&str; 6] = ["name", "email", "age", "role", "department", "location"];

const SEED_ROWS: [(&str, &str, i64, &str, &str, &str); 25] = [
    ("Alice", "alice@example.com", 25, "Developer", "IT", "Hyderabad"),
    ("Bob", "bob@example.com", 30, "Designer", "UI/UX", "Mumbai"),
    ("Charlie", "charlie@example.com", 28, "Tester", "QA", "Delhi"),
    ("David", "david@example.com", 32, "Manager", "Admin", "Pune"),
    ("Emma", "emma@example.com", 27, "Developer", "IT", "Bangalore"),
    ("Frank", "frank@example.com", 35, "Analyst", "Finance", "Chennai"),
    ("Grace", "grace@example.com", 29, "Designer", "UI/UX", "Kolkata"),
    ("Hannah", "hannah@example.com", 31, "Tester", "QA", "Delhi"),
    ("Ian", "ian@example.com", 26, "Developer", "IT", "Hyderabad"),
    ("Jack", "jack@example.com", 33, "Manager", "Admin", "Pune"),
    ("Kate", "kate@example.com", 24, "Intern", "HR", "Delhi"),
    ("Leo", "leo@example.com", 29, "Analyst", "Finance", "Chennai"),
    ("Mia", "mia@example.com", 34, "Lead", "IT", "Hyderabad"),
    ("Nick", "nick@example.com", 27, "Tester", "QA", "Bangalore"),
    ("Olivia", "olivia@example.com", 25, "Developer", "IT", "Pune"),
    ("Paul", "paul@example.com", 30, "Designer", "UI/UX", "Kolkata"),
    ("Quinn", "quinn@example.com", 31, "Manager", "Admin", "Delhi"),
    ("Rose", "rose@example.com", 28, "Analyst", "Finance", "Chennai"),
    ("Steve", "steve@example.com", 32, "Tester", "QA", "Bangalore"),
    ("Tina", "tina@example.com", 29, "Developer", "IT", "Hyderabad"),
    ("Uma", "uma@example.com", 33, "Manager", "Admin", "Pune"),
    ("Victor", "victor@example.com", 35, "Analyst", "Finance", "Kolkata"),
    ("Wendy", "wendy@example.com", 27, "Designer", "UI/UX", "Mumbai"),
    ("Xavier", "xavier@example.com", 26, "Developer", "IT", "Chennai"),
    ("Yara", "yara@example.com", 34, "Lead", "HR", "Delhi"),
];

/// The built-in dataset loaded at startup.
pub fn seed_records() -> Vec<Record> {
    SEED_ROWS
        .iter()
        .map(|(name, email, age, role, department, location)| {
            let values = [
                FieldValue::from(*name),
                FieldValue::from(*email),
                FieldValue::from(*age),
                FieldValue::from(*role),
                FieldValue::from(*department),
                FieldValue::from(*location),
            ];
            Record::from_pairs(SEED_COLUMNS.iter().copied().zip(values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_records_shape() {
        let records = seed_records();
        assert_eq!(records.len(), 25);
        for record in &records {
            let keys: Vec<&str> = record.keys().collect();
            assert_eq!(keys, SEED_COLUMNS.to_vec());
        }
        assert_eq!(records[10].get("name"), Some(&FieldValue::from("Kate")));
        assert_eq!(records[10].get("age"), Some(&FieldValue::from(24)));
    }
}
