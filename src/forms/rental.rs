//! Rental booking form: field rules, derived validity, and submission.

use crate::forms::FormPhase;
use crate::models::{CreateRentalDto, Equipment, Rental, RentalSource};
use crate::utils::dates::parse_datetime;
use crate::utils::phone::{is_valid_phone, normalize_phone};

const MSG_EQUIPMENT_REQUIRED: &str = "Необходимо выбрать оборудование";
const MSG_INSTANCE_RANGE: &str = "Недопустимый номер экземпляра оборудования";
const MSG_START_REQUIRED: &str = "Необходимо указать дату начала";
const MSG_END_REQUIRED: &str = "Необходимо указать дату окончания";
const MSG_NAME_REQUIRED: &str = "Необходимо указать ФИО арендатора";
const MSG_PHONE_LENGTH: &str = "Номер телефона должен содержать 11 цифр";
const MSG_DATE_ORDER: &str = "Дата окончания должна быть позже даты начала";
const MSG_DATE_FORMAT: &str = "Некорректный формат даты";

/// One selectable equipment instance, encoded as `"{id}-{n}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOption {
    pub value: String,
    pub label: String,
}

/// Flatten every equipment identity into its numbered instances.
pub fn instance_options(equipment: &[Equipment]) -> Vec<InstanceOption> {
    equipment
        .iter()
        .flat_map(|item| {
            (1..=item.quantity).map(|n| InstanceOption {
                value: format!("{}-{}", item.id, n),
                label: format!("{} #{}", item.name, n),
            })
        })
        .collect()
}

/// Parse a composite `"{equipment_id}-{instance}"` key.
pub fn parse_instance_key(raw: &str) -> Option<(i64, u32)> {
    let (id, instance) = raw.split_once('-')?;
    Some((id.parse().ok()?, instance.parse().ok()?))
}

/// Editable field values. Dates hold `datetime-local` strings at minute
/// precision.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDraft {
    pub equipment_id: i64,
    pub equipment_instance: Option<u32>,
    pub start_date: String,
    pub end_date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub needs_delivery: bool,
    pub delivery_address: String,
    pub rental_price: f64,
    pub delivery_price: f64,
    pub delivery_costs: f64,
    pub source: RentalSource,
    pub comment: String,
}

impl Default for RentalDraft {
    fn default() -> Self {
        Self {
            equipment_id: 0,
            equipment_instance: None,
            start_date: String::new(),
            end_date: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            needs_delivery: false,
            delivery_address: String::new(),
            rental_price: 0.0,
            delivery_price: 0.0,
            delivery_costs: 0.0,
            source: RentalSource::Avito,
            comment: String::new(),
        }
    }
}

/// Per-field validation messages. All failing rules are populated together
/// on submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalErrors {
    pub equipment: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dates: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
}

impl RentalErrors {
    pub fn is_empty(&self) -> bool {
        self.equipment.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.dates.is_none()
            && self.customer_name.is_none()
            && self.phone.is_none()
    }

    pub fn messages(&self) -> Vec<&str> {
        [
            &self.equipment,
            &self.start_date,
            &self.end_date,
            &self.dates,
            &self.customer_name,
            &self.phone,
        ]
        .into_iter()
        .filter_map(|m| m.as_deref())
        .collect()
    }
}

/// One open rental form.
pub struct RentalForm {
    equipment: Vec<Equipment>,
    draft: RentalDraft,
    errors: RentalErrors,
    phase: FormPhase,
    editing_id: Option<i64>,
}

impl RentalForm {
    /// Open a blank form for creating a booking.
    pub fn new(equipment: Vec<Equipment>) -> Self {
        Self {
            equipment,
            draft: RentalDraft::default(),
            errors: RentalErrors::default(),
            phase: FormPhase::Empty,
            editing_id: None,
        }
    }

    /// Open the form seeded from an existing booking. Full timestamps are
    /// truncated to the minute precision the datetime input accepts.
    pub fn edit(equipment: Vec<Equipment>, rental: &Rental) -> Self {
        let draft = RentalDraft {
            equipment_id: rental.equipment_id,
            equipment_instance: rental.equipment_instance,
            start_date: truncate_to_minutes(&rental.start_date),
            end_date: truncate_to_minutes(&rental.end_date),
            customer_name: rental.customer_name.clone(),
            customer_phone: rental.customer_phone.clone(),
            needs_delivery: rental.needs_delivery,
            delivery_address: rental.delivery_address.clone().unwrap_or_default(),
            rental_price: rental.rental_price,
            delivery_price: rental.delivery_price,
            delivery_costs: rental.delivery_costs,
            source: rental.source,
            comment: rental.comment.clone().unwrap_or_default(),
        };

        Self {
            equipment,
            draft,
            errors: RentalErrors::default(),
            phase: FormPhase::Editing,
            editing_id: Some(rental.id),
        }
    }

    pub fn draft(&self) -> &RentalDraft {
        &self.draft
    }

    pub fn errors(&self) -> &RentalErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    /// Select an equipment instance by composite key. Anything that does
    /// not parse clears the selection.
    pub fn select_equipment(&mut self, composite: &str) {
        match parse_instance_key(composite) {
            Some((id, instance)) => {
                self.draft.equipment_id = id;
                self.draft.equipment_instance = Some(instance);
                self.errors.equipment = self.validate_equipment();
            }
            None => {
                self.draft.equipment_id = 0;
                self.draft.equipment_instance = None;
            }
        }
        self.touch();
    }

    /// Phone input: digits-only normalization before storage, then the
    /// length rule.
    pub fn set_phone(&mut self, raw: &str) {
        self.draft.customer_phone = normalize_phone(raw);
        self.errors.phone = self.validate_phone();
        self.touch();
    }

    pub fn set_start_date(&mut self, value: &str) {
        self.draft.start_date = value.to_string();
        if !value.trim().is_empty() {
            self.errors.start_date = None;
        }
        self.errors.dates = self.validate_date_order();
        self.touch();
    }

    pub fn set_end_date(&mut self, value: &str) {
        self.draft.end_date = value.to_string();
        if !value.trim().is_empty() {
            self.errors.end_date = None;
        }
        self.errors.dates = self.validate_date_order();
        self.touch();
    }

    pub fn set_customer_name(&mut self, value: &str) {
        self.draft.customer_name = value.to_string();
        if !value.trim().is_empty() {
            self.errors.customer_name = None;
        }
        self.touch();
    }

    pub fn set_rental_price(&mut self, value: f64) {
        self.draft.rental_price = value;
        self.touch();
    }

    pub fn set_needs_delivery(&mut self, value: bool) {
        self.draft.needs_delivery = value;
        self.touch();
    }

    pub fn set_delivery_address(&mut self, value: &str) {
        self.draft.delivery_address = value.to_string();
        self.touch();
    }

    pub fn set_delivery_price(&mut self, value: f64) {
        self.draft.delivery_price = value;
        self.touch();
    }

    pub fn set_delivery_costs(&mut self, value: f64) {
        self.draft.delivery_costs = value;
        self.touch();
    }

    pub fn set_source(&mut self, source: RentalSource) {
        self.draft.source = source;
        self.touch();
    }

    pub fn set_comment(&mut self, value: &str) {
        self.draft.comment = value.to_string();
        self.touch();
    }

    /// Conjunction of all field rules. Does not mutate error state.
    pub fn is_valid(&self) -> bool {
        self.validate_equipment().is_none()
            && !self.draft.start_date.trim().is_empty()
            && !self.draft.end_date.trim().is_empty()
            && self.validate_date_order().is_none()
            && !self.draft.customer_name.trim().is_empty()
            && self.validate_phone().is_none()
    }

    /// Re-evaluate every rule and surface all failing messages at once.
    pub fn validate_all(&mut self) -> bool {
        self.errors = RentalErrors {
            equipment: self.validate_equipment(),
            start_date: self
                .draft
                .start_date
                .trim()
                .is_empty()
                .then(|| MSG_START_REQUIRED.to_string()),
            end_date: self
                .draft
                .end_date
                .trim()
                .is_empty()
                .then(|| MSG_END_REQUIRED.to_string()),
            dates: self.validate_date_order(),
            customer_name: self
                .draft
                .customer_name
                .trim()
                .is_empty()
                .then(|| MSG_NAME_REQUIRED.to_string()),
            phone: self.validate_phone(),
        };
        self.errors.is_empty()
    }

    /// Attempt submission. While any rule fails this is a no-op returning
    /// `None` with every failing message populated.
    pub fn submit(&mut self) -> Option<CreateRentalDto> {
        if !self.validate_all() {
            self.phase = FormPhase::Invalid;
            return None;
        }

        self.phase = FormPhase::Submitted;
        let draft = &self.draft;
        Some(CreateRentalDto {
            equipment_id: draft.equipment_id,
            equipment_instance: draft.equipment_instance,
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            needs_delivery: draft.needs_delivery,
            delivery_address: (!draft.delivery_address.trim().is_empty())
                .then(|| draft.delivery_address.clone()),
            rental_price: draft.rental_price,
            delivery_price: Some(draft.delivery_price),
            delivery_costs: Some(draft.delivery_costs),
            source: draft.source,
            comment: (!draft.comment.trim().is_empty()).then(|| draft.comment.clone()),
        })
    }

    fn touch(&mut self) {
        self.phase = if self.is_valid() {
            FormPhase::Valid
        } else {
            FormPhase::Invalid
        };
    }

    fn validate_equipment(&self) -> Option<String> {
        let instance = match (self.draft.equipment_id, self.draft.equipment_instance) {
            (id, Some(instance)) if id > 0 => instance,
            _ => return Some(MSG_EQUIPMENT_REQUIRED.to_string()),
        };

        let item = match self
            .equipment
            .iter()
            .find(|e| e.id == self.draft.equipment_id)
        {
            Some(item) => item,
            None => return Some(MSG_EQUIPMENT_REQUIRED.to_string()),
        };
        if instance >= 1 && instance <= item.quantity {
            None
        } else {
            Some(MSG_INSTANCE_RANGE.to_string())
        }
    }

    fn validate_phone(&self) -> Option<String> {
        if is_valid_phone(&self.draft.customer_phone) {
            None
        } else {
            Some(MSG_PHONE_LENGTH.to_string())
        }
    }

    fn validate_date_order(&self) -> Option<String> {
        let start_raw = self.draft.start_date.trim();
        let end_raw = self.draft.end_date.trim();
        if start_raw.is_empty() || end_raw.is_empty() {
            return None;
        }

        match (parse_datetime(start_raw), parse_datetime(end_raw)) {
            (Some(start), Some(end)) if end > start => None,
            (Some(_), Some(_)) => Some(MSG_DATE_ORDER.to_string()),
            _ => Some(MSG_DATE_FORMAT.to_string()),
        }
    }
}

fn truncate_to_minutes(timestamp: &str) -> String {
    timestamp.get(..16).unwrap_or(timestamp).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill(quantity: u32) -> Equipment {
        Equipment {
            id: 3,
            name: "Перфоратор".to_string(),
            quantity,
            description: None,
            base_price: 1500.0,
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    fn filled_form() -> RentalForm {
        let mut form = RentalForm::new(vec![drill(2)]);
        form.select_equipment("3-1");
        form.set_start_date("2024-06-10T10:00");
        form.set_end_date("2024-06-12T10:00");
        form.set_customer_name("Иванов Иван");
        form.set_phone("+7 (999) 123-45-67");
        form
    }

    #[test]
    fn test_instance_options_expand_quantity() {
        let options = instance_options(&[drill(2)]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "3-1");
        assert_eq!(options[1].label, "Перфоратор #2");
    }

    #[test]
    fn test_parse_instance_key() {
        assert_eq!(parse_instance_key("3-2"), Some((3, 2)));
        assert_eq!(parse_instance_key("3"), None);
        assert_eq!(parse_instance_key("x-2"), None);
    }

    #[test]
    fn test_empty_submit_reports_every_failure_at_once() {
        let mut form = RentalForm::new(vec![drill(1)]);
        assert!(form.submit().is_none());
        assert_eq!(form.phase(), FormPhase::Invalid);

        let errors = form.errors();
        assert_eq!(errors.equipment.as_deref(), Some(MSG_EQUIPMENT_REQUIRED));
        assert_eq!(errors.start_date.as_deref(), Some(MSG_START_REQUIRED));
        assert_eq!(errors.end_date.as_deref(), Some(MSG_END_REQUIRED));
        assert_eq!(errors.customer_name.as_deref(), Some(MSG_NAME_REQUIRED));
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_LENGTH));
    }

    #[test]
    fn test_valid_form_submits_dto() {
        let mut form = filled_form();
        assert_eq!(form.phase(), FormPhase::Valid);

        let dto = form.submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert_eq!(dto.equipment_id, 3);
        assert_eq!(dto.equipment_instance, Some(1));
        assert_eq!(dto.customer_phone, "79991234567");
        assert_eq!(dto.delivery_address, None);
    }

    #[test]
    fn test_instance_out_of_range() {
        let mut form = filled_form();
        form.select_equipment("3-5");
        assert!(form.submit().is_none());
        assert_eq!(form.errors().equipment.as_deref(), Some(MSG_INSTANCE_RANGE));
    }

    #[test]
    fn test_end_must_be_strictly_after_start() {
        let mut form = filled_form();
        form.set_end_date("2024-06-10T10:00");
        assert!(form.submit().is_none());
        assert_eq!(form.errors().dates.as_deref(), Some(MSG_DATE_ORDER));

        form.set_end_date("2024-06-10T10:01");
        assert!(form.submit().is_some());
    }

    #[test]
    fn test_unparseable_date_is_a_format_error() {
        let mut form = filled_form();
        form.set_end_date("вчера");
        assert!(form.submit().is_none());
        assert_eq!(form.errors().dates.as_deref(), Some(MSG_DATE_FORMAT));
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut form = filled_form();
        form.set_phone("12345");
        assert_eq!(form.draft().customer_phone, "12345");
        assert!(form.submit().is_none());
        assert_eq!(form.errors().phone.as_deref(), Some(MSG_PHONE_LENGTH));
    }

    #[test]
    fn test_edit_seeds_and_truncates_timestamps() {
        let rental = Rental {
            id: 7,
            equipment_id: 3,
            equipment_instance: Some(2),
            start_date: "2024-06-10T10:00:00.000".to_string(),
            end_date: "2024-06-12T10:00:00.000".to_string(),
            customer_name: "Петров".to_string(),
            customer_phone: "79990000000".to_string(),
            needs_delivery: true,
            delivery_address: Some("ул. Ленина, 1".to_string()),
            rental_price: 3000.0,
            delivery_price: 500.0,
            delivery_costs: 200.0,
            source: RentalSource::Website,
            comment: None,
            status: crate::models::RentalStatus::Active,
            created_at: "2024-06-01T00:00:00".to_string(),
            updated_at: "2024-06-01T00:00:00".to_string(),
            equipment_name: Some("Перфоратор".to_string()),
        };

        let form = RentalForm::edit(vec![drill(2)], &rental);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.editing_id(), Some(7));
        assert_eq!(form.draft().start_date, "2024-06-10T10:00");
        assert!(form.is_valid());
    }
}
