//! Equipment catalogue form.

use crate::forms::FormPhase;
use crate::models::{CreateEquipmentDto, Equipment};

const MSG_NAME_REQUIRED: &str = "Необходимо указать название";
const MSG_QUANTITY_MIN: &str = "Количество должно быть не меньше 1";
const MSG_PRICE_NEGATIVE: &str = "Цена не может быть отрицательной";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentErrors {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub base_price: Option<String>,
}

impl EquipmentErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.base_price.is_none()
    }
}

/// Form for creating or editing a catalogue entry.
pub struct EquipmentForm {
    name: String,
    quantity: u32,
    description: String,
    base_price: f64,
    errors: EquipmentErrors,
    phase: FormPhase,
    editing_id: Option<i64>,
}

impl EquipmentForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            description: String::new(),
            base_price: 0.0,
            errors: EquipmentErrors::default(),
            phase: FormPhase::Empty,
            editing_id: None,
        }
    }

    pub fn edit(item: &Equipment) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            description: item.description.clone().unwrap_or_default(),
            base_price: item.base_price,
            errors: EquipmentErrors::default(),
            phase: FormPhase::Editing,
            editing_id: Some(item.id),
        }
    }

    pub fn errors(&self) -> &EquipmentErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn set_name(&mut self, value: &str) {
        self.name = value.to_string();
        if !value.trim().is_empty() {
            self.errors.name = None;
        }
        self.touch();
    }

    pub fn set_quantity(&mut self, value: u32) {
        self.quantity = value;
        if value >= 1 {
            self.errors.quantity = None;
        }
        self.touch();
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
        self.touch();
    }

    pub fn set_base_price(&mut self, value: f64) {
        self.base_price = value;
        if value >= 0.0 {
            self.errors.base_price = None;
        }
        self.touch();
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity >= 1 && self.base_price >= 0.0
    }

    pub fn validate_all(&mut self) -> bool {
        self.errors = EquipmentErrors {
            name: self
                .name
                .trim()
                .is_empty()
                .then(|| MSG_NAME_REQUIRED.to_string()),
            quantity: (self.quantity < 1).then(|| MSG_QUANTITY_MIN.to_string()),
            base_price: (self.base_price < 0.0).then(|| MSG_PRICE_NEGATIVE.to_string()),
        };
        self.errors.is_empty()
    }

    pub fn submit(&mut self) -> Option<CreateEquipmentDto> {
        if !self.validate_all() {
            self.phase = FormPhase::Invalid;
            return None;
        }

        self.phase = FormPhase::Submitted;
        Some(CreateEquipmentDto {
            name: self.name.clone(),
            quantity: self.quantity,
            description: (!self.description.trim().is_empty())
                .then(|| self.description.clone()),
            base_price: self.base_price,
        })
    }

    fn touch(&mut self) {
        self.phase = if self.is_valid() {
            FormPhase::Valid
        } else {
            FormPhase::Invalid
        };
    }
}

impl Default for EquipmentForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let mut form = EquipmentForm::new();
        form.set_name("   ");
        form.set_base_price(1000.0);
        assert!(form.submit().is_none());
        assert_eq!(form.errors().name.as_deref(), Some(MSG_NAME_REQUIRED));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut form = EquipmentForm::new();
        form.set_name("Бетономешалка");
        form.set_quantity(0);
        assert!(form.submit().is_none());
        assert_eq!(form.errors().quantity.as_deref(), Some(MSG_QUANTITY_MIN));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut form = EquipmentForm::new();
        form.set_name("Бетономешалка");
        form.set_base_price(-1.0);
        assert!(form.submit().is_none());
        assert_eq!(form.errors().base_price.as_deref(), Some(MSG_PRICE_NEGATIVE));
    }

    #[test]
    fn test_valid_submit() {
        let mut form = EquipmentForm::new();
        form.set_name("Бетономешалка");
        form.set_quantity(3);
        form.set_base_price(1200.0);
        assert_eq!(form.phase(), FormPhase::Valid);

        let dto = form.submit().unwrap();
        assert_eq!(dto.name, "Бетономешалка");
        assert_eq!(dto.quantity, 3);
        assert_eq!(dto.description, None);
        assert_eq!(form.phase(), FormPhase::Submitted);
    }
}
