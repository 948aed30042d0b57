use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Данные участника: одна запись на каждое забронированное место.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, max = 150))]
    pub age: u32,
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    pub nationality: String,
    #[validate(custom(function = "phone_number"))]
    pub contact_number: String,
    #[validate(email)]
    pub email: String,
}

impl Attendee {
    /// Полная проверка участника; дата рождения сверяется с переданным "сегодня".
    pub fn validate_as_of(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.date_of_birth > today {
            errors.add("dob", ValidationError::new("date_in_future"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// Цифры, пробелы и + - ( ) . ; хотя бы одна цифра
fn phone_number(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    if !allowed || !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("phone_number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee() -> Attendee {
        Attendee {
            name: "Amira Khalid".into(),
            age: 29,
            date_of_birth: NaiveDate::from_ymd_opt(1996, 3, 14).unwrap(),
            nationality: "UAE".into(),
            contact_number: "+971 50 123 4567".into(),
            email: "amira@example.com".into(),
        }
    }

    #[test]
    fn valid_attendee_passes() {
        assert!(attendee().validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut a = attendee();
        a.name = "   ".into();
        a.nationality = String::new();
        let errors = a.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("nationality"));
    }

    #[test]
    fn age_must_be_positive() {
        let mut a = attendee();
        a.age = 0;
        assert!(a.validate().unwrap_err().field_errors().contains_key("age"));
    }

    #[test]
    fn email_and_phone_are_checked() {
        let mut a = attendee();
        a.email = "not-an-email".into();
        a.contact_number = "call me".into();
        let errors = a.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn birth_date_is_checked_against_given_day() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let mut a = attendee();
        a.date_of_birth = today;
        assert!(a.validate_as_of(today).is_ok());

        a.date_of_birth = NaiveDate::from_ymd_opt(2025, 5, 21).unwrap();
        let errors = a.validate_as_of(today).unwrap_err();
        assert!(errors.field_errors().contains_key("dob"));
        // тот же день рождения допустим, если "сегодня" позже
        assert!(a.validate_as_of(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).is_ok());
    }

    #[test]
    fn field_errors_and_birth_date_are_reported_together() {
        let mut a = attendee();
        a.name = String::new();
        a.date_of_birth = NaiveDate::from_ymd_opt(2031, 1, 1).unwrap();
        let errors = a.validate_as_of(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("dob"));
    }

    #[test]
    fn uses_original_field_names() {
        let json = serde_json::to_value(attendee()).unwrap();
        assert_eq!(json["dob"], "1996-03-14");
        assert_eq!(json["contactNumber"], "+971 50 123 4567");
    }
}
