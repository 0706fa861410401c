use contracts::domain::a004_coupon::aggregate::{CouponDto, CouponFormDto, DiscountType};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_coupon::api;
use crate::shared::components::{FieldError, TextField};
use crate::shared::date_utils::{parse_input_value, to_input_value};
use crate::shared::notify::use_notifier;

/// Raw input of the coupon form, as typed.
#[derive(Debug, Clone, PartialEq)]
struct CouponInput {
    code: String,
    discount_type: String,
    amount: String,
    max_uses: String,
    valid_from: String,
    valid_until: String,
}

impl From<&CouponFormDto> for CouponInput {
    fn from(dto: &CouponFormDto) -> Self {
        Self {
            code: dto.code.clone(),
            discount_type: dto.discount_type.as_str().to_string(),
            amount: dto.amount.to_string(),
            max_uses: dto.max_uses.map(|m| m.to_string()).unwrap_or_default(),
            valid_from: dto.valid_from.as_ref().map(to_input_value).unwrap_or_default(),
            valid_until: dto.valid_until.as_ref().map(to_input_value).unwrap_or_default(),
        }
    }
}

impl CouponInput {
    /// Parse the raw strings, then apply the coupon rules.
    fn to_dto(&self) -> Result<CouponFormDto, FieldErrors> {
        let mut errors = FieldErrors::new();

        let amount = self.amount.trim().replace(',', ".").parse::<f64>().ok();
        errors.check("amount", amount.is_some(), "Enter a number");

        let max_uses = match self.max_uses.trim() {
            "" => Ok(None),
            raw => raw.parse::<u32>().map(Some),
        };
        errors.check("max_uses", max_uses.is_ok(), "Enter a whole number or leave empty");

        let mut date = |field: &'static str, raw: &str| {
            let parsed = parse_input_value(raw);
            errors.check(field, raw.trim().is_empty() || parsed.is_some(), "Enter a valid date and time");
            parsed
        };
        let valid_from = date("valid_from", &self.valid_from);
        let valid_until = date("valid_until", &self.valid_until);
        errors.into_result()?;

        let dto = CouponFormDto {
            code: self.code.trim().to_uppercase(),
            discount_type: DiscountType::parse(&self.discount_type).unwrap_or(DiscountType::Percent),
            amount: amount.unwrap_or_default(),
            max_uses: max_uses.unwrap_or_default(),
            valid_from,
            valid_until,
        };
        dto.validate()?;
        Ok(dto)
    }
}

/// Create (`coupon = None`) or edit a coupon.
#[component]
pub fn CouponForm<F1, F2>(
    event_id: String,
    coupon: Option<CouponDto>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + Copy + Send + Sync + 'static,
    F2: Fn() + Copy + Send + Sync + 'static,
{
    let notifier = use_notifier();
    let event_id = StoredValue::new(event_id);
    let coupon_id = StoredValue::new(coupon.as_ref().map(|c| c.id.clone()));
    let is_edit = coupon.is_some();
    let initial = coupon
        .as_ref()
        .map(CouponFormDto::from)
        .unwrap_or_default();

    let form = RwSignal::new(CouponInput::from(&initial));
    let discount_type = RwSignal::new(initial.discount_type.as_str().to_string());
    let errors = RwSignal::new(FieldErrors::default());
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let value = discount_type.get();
        form.update(|f| f.discount_type = value);
    });

    let field = move |get: fn(&CouponInput) -> String, set: fn(&mut CouponInput, String)| {
        (
            Signal::derive(move || form.with(get)),
            Callback::new(move |value: String| form.update(|f| set(f, value))),
        )
    };
    let (code, on_code) = field(|f| f.code.clone(), |f, v| f.code = v.to_uppercase());
    let (amount, on_amount) = field(|f| f.amount.clone(), |f, v| f.amount = v);
    let (max_uses, on_max_uses) = field(|f| f.max_uses.clone(), |f, v| f.max_uses = v);
    let (valid_from, on_valid_from) = field(|f| f.valid_from.clone(), |f, v| f.valid_from = v);
    let (valid_until, on_valid_until) = field(|f| f.valid_until.clone(), |f, v| f.valid_until = v);

    let handle_submit = move || {
        let dto = match form.with_untracked(|f| f.to_dto()) {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        set_saving.set(true);
        let event = event_id.get_value();
        let id = coupon_id.get_value();

        spawn_local(async move {
            let result = match id {
                Some(id) => api::update_coupon(&event, &id, &dto).await,
                None => api::create_coupon(&event, &dto).await,
            };
            match result {
                Ok(saved) => {
                    notifier.success(format!("Coupon {} saved", saved.code));
                    on_saved();
                }
                Err(e) if e.is_already_done() => {
                    errors.update(|errs| errs.add("code", "This code is already in use"));
                    set_saving.set(false);
                }
                Err(e) => {
                    notifier.error(&e);
                    set_saving.set(false);
                }
            }
        });
    };

    let busy = Signal::derive(move || saving.get());
    let amount_label = move || {
        if discount_type.get() == DiscountType::Fixed.as_str() {
            "Amount"
        } else {
            "Percent"
        }
    };

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>{if is_edit { "Edit coupon" } else { "New coupon" }}</h2>
                </div>
                <div class="modal-body">
                    <TextField label="Code" field="code" value=code on_input=on_code errors=errors
                        placeholder="EARLYBIRD-10" disabled=busy />
                    <div class="form__group">
                        <Label>"Discount type"</Label>
                        <Select value=discount_type>
                            <option value=DiscountType::Percent.as_str()>"Percentage"</option>
                            <option value=DiscountType::Fixed.as_str()>"Fixed amount"</option>
                        </Select>
                    </div>
                    <div class="form__group" class:form__group--invalid=move || errors.with(|e| e.has("amount"))>
                        <label>{amount_label}</label>
                        <input
                            type="number"
                            step="0.01"
                            prop:value=move || amount.get()
                            on:input=move |ev| on_amount.run(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                        <FieldError errors=errors field="amount" />
                    </div>
                    <TextField label="Maximum uses" field="max_uses" input_type="number" value=max_uses
                        on_input=on_max_uses errors=errors placeholder="Unlimited" disabled=busy />
                    <TextField label="Valid from" field="valid_from" input_type="datetime-local" value=valid_from
                        on_input=on_valid_from errors=errors disabled=busy />
                    <TextField label="Valid until" field="valid_until" input_type="datetime-local" value=valid_until
                        on_input=on_valid_until errors=errors disabled=busy />
                </div>
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_submit() disabled=busy>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CouponInput {
        CouponInput::from(&CouponFormDto {
            code: "SPRING-10".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_valid_input_becomes_dto() {
        let mut raw = input();
        raw.code = " spring-10 ".to_string();
        raw.amount = "12,5".to_string();
        raw.max_uses = "100".to_string();
        let dto = raw.to_dto().unwrap();
        assert_eq!(dto.code, "SPRING-10");
        assert_eq!(dto.amount, 12.5);
        assert_eq!(dto.max_uses, Some(100));
        assert_eq!(dto.valid_from, None);
    }

    #[test]
    fn test_unparseable_numbers_are_field_errors() {
        let mut raw = input();
        raw.amount = "ten".to_string();
        raw.max_uses = "-3".to_string();
        let errors = raw.to_dto().unwrap_err();
        assert!(errors.has("amount"));
        assert!(errors.has("max_uses"));
    }

    #[test]
    fn test_percent_range_and_window_order() {
        let mut raw = input();
        raw.amount = "150".to_string();
        raw.valid_from = "2030-02-01T00:00".to_string();
        raw.valid_until = "2030-01-01T00:00".to_string();
        let errors = raw.to_dto().unwrap_err();
        assert!(errors.has("amount"));
        assert!(errors.has("valid_until"));
    }

    #[test]
    fn test_fixed_amount_accepts_above_hundred() {
        let mut raw = input();
        raw.discount_type = DiscountType::Fixed.as_str().to_string();
        raw.amount = "250".to_string();
        assert_eq!(raw.to_dto().map(|d| d.discount_type), Ok(DiscountType::Fixed));
    }
}
