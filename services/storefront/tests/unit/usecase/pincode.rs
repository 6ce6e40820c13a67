use std::boxed::Box;
use std::sync::Arc;

use storefront_common::api::web::dto::ZipCodeErrorReason;

use storefront::adapter::directory::{
    AbstractPostalDirectory, BrokenPostalDirectory, MockPostalDirectory, PostalAreaDto,
};
use storefront::usecase::{PincodeAutofillError, PincodeAutofillOutcome, PincodeAutofillUseCase};

use super::super::ut_setup_sharestate;

fn ut_area(name: &str, district: &str, state: &str) -> PostalAreaDto {
    PostalAreaDto {
        name: name.to_string(),
        district: district.to_string(),
        state: state.to_string(),
    }
}

fn ut_usecase(directory: Box<dyn AbstractPostalDirectory>) -> PincodeAutofillUseCase {
    let shr_state = ut_setup_sharestate();
    PincodeAutofillUseCase::new(Arc::new(directory), shr_state.log_context())
}

#[tokio::test]
async fn lone_area_autofills_both_fields() {
    let directory = MockPostalDirectory::build().with_areas(
        "517504",
        vec![ut_area("Tirumala", "Tirupati", "Andhra Pradesh")],
    );
    let uc = ut_usecase(Box::new(directory));
    let outcome = uc.execute("517504").await.unwrap();
    assert_eq!(
        outcome,
        PincodeAutofillOutcome::AutoFilled {
            state: "Andhra Pradesh".to_string(),
            city: "Tirumala".to_string(),
        }
    );
}

#[tokio::test]
async fn several_areas_leave_city_choice_open() {
    let directory = MockPostalDirectory::build().with_areas(
        "560001",
        vec![
            ut_area("Bangalore GPO", "Bengaluru", "Karnataka"),
            ut_area("HighCourt", "Bengaluru", "Karnataka"),
            ut_area("Vidhana Soudha", "Bengaluru", "Karnataka"),
        ],
    );
    let uc = ut_usecase(Box::new(directory));
    let outcome = uc.execute("560001").await.unwrap();
    let PincodeAutofillOutcome::Ambiguous { state, options } = outcome else {
        panic!("expected ambiguous outcome");
    };
    assert_eq!(state.as_str(), "Karnataka");
    assert_eq!(options.len(), 3);
    assert_eq!(options[1].value.as_str(), "HighCourt");
    assert_eq!(options[1].label.as_str(), "Bengaluru - HighCourt");
}

#[tokio::test]
async fn unknown_code_degrades_to_manual_entry() {
    let uc = ut_usecase(Box::new(MockPostalDirectory::build()));
    let outcome = uc.execute("999999").await.unwrap();
    assert_eq!(outcome, PincodeAutofillOutcome::ManualEntry);
}

#[tokio::test]
async fn directory_outage_degrades_to_manual_entry() {
    let uc = ut_usecase(Box::new(BrokenPostalDirectory));
    let outcome = uc.execute("517504").await.unwrap();
    assert_eq!(outcome, PincodeAutofillOutcome::ManualEntry);
}

#[tokio::test]
async fn malformed_code_rejected_before_lookup() {
    // the broken directory would error out, the format gate has to
    // reject first
    let uc = ut_usecase(Box::new(BrokenPostalDirectory));
    let cases = [
        ("51750", ZipCodeErrorReason::WrongNumDigits),
        ("5175042", ZipCodeErrorReason::WrongNumDigits),
        ("51750a", ZipCodeErrorReason::InvalidChar),
        ("", ZipCodeErrorReason::Empty),
    ];
    for (bad, reason) in cases {
        let result = uc.execute(bad).await;
        assert_eq!(result, Err(PincodeAutofillError::BadCode(reason)));
    }
}
