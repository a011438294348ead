//! In-memory port implementations and app builders for handler tests.
//!
//! The registry keeps all five entity stores behind one mutex so guard
//! conditions that span entities (the fleet-delete check) behave like the
//! real adapter. Handler tests wire it into [`HttpState`] and drive the
//! full routing surface.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    FarePersistenceError, FareRepository, FleetPersistenceError, FleetRepository,
    MatatuPersistenceError, MatatuRepository, PasswordHashError, PasswordHasher,
    PaymentPersistenceError, PaymentRepository, TokenIssueError, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Fare, Fleet, Matatu, NewFare, NewFleet, NewMatatu, NewPayment, NewUser, Page, Payment, User,
};
use crate::inbound::http::state::HttpState;

#[derive(Default)]
struct RegistryState {
    users: Vec<User>,
    fleets: Vec<Fleet>,
    matatus: Vec<Matatu>,
    fares: Vec<Fare>,
    payments: Vec<Payment>,
    next_id: i32,
}

impl RegistryState {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory store implementing every repository port.
#[derive(Default)]
pub(crate) struct InMemoryRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRegistry {
    pub(crate) fn matatu_count(&self) -> usize {
        self.state.lock().expect("state lock").matatus.len()
    }

    pub(crate) fn fleet_count(&self) -> usize {
        self.state.lock().expect("state lock").fleets.len()
    }
}

fn window<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    let skip = usize::try_from(page.skip.max(0)).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit.max(0)).unwrap_or(usize::MAX);
    rows.iter().skip(skip).take(limit).cloned().collect()
}

#[async_trait]
impl UserRepository for InMemoryRegistry {
    async fn create(
        &self,
        draft: &NewUser,
        hashed_password: &str,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state.users.iter().any(|user| user.email == draft.email) {
            return Err(UserPersistenceError::duplicate_email(draft.email.clone()));
        }
        let user = User {
            id: state.allocate_id(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            hashed_password: hashed_password.to_owned(),
            phone: draft.phone.clone(),
            role: draft.role.clone(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.users.iter().find(|user| user.email == email).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(window(&state.users, page))
    }
}

#[async_trait]
impl FleetRepository for InMemoryRegistry {
    async fn create(&self, draft: &NewFleet) -> Result<Fleet, FleetPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let fleet = Fleet {
            id: state.allocate_id(),
            name: draft.name.clone(),
            operator_id: draft.operator_id.clone(),
        };
        state.fleets.push(fleet.clone());
        Ok(fleet)
    }

    async fn find_by_id(&self, fleet_id: i32) -> Result<Option<Fleet>, FleetPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .fleets
            .iter()
            .find(|fleet| fleet.id == fleet_id)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Fleet>, FleetPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(window(&state.fleets, page))
    }

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Fleet>, FleetPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .fleets
            .iter()
            .filter(|fleet| fleet.operator_id == operator_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, fleet_id: i32) -> Result<(), FleetPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if !state.fleets.iter().any(|fleet| fleet.id == fleet_id) {
            return Err(FleetPersistenceError::NotFound { fleet_id });
        }
        if state
            .matatus
            .iter()
            .any(|matatu| matatu.fleet_id == Some(fleet_id))
        {
            return Err(FleetPersistenceError::MatatusAssigned { fleet_id });
        }
        state.fleets.retain(|fleet| fleet.id != fleet_id);
        Ok(())
    }
}

#[async_trait]
impl MatatuRepository for InMemoryRegistry {
    async fn register(&self, draft: &NewMatatu) -> Result<Matatu, MatatuPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state
            .matatus
            .iter()
            .any(|matatu| matatu.registration_number == draft.registration_number)
        {
            return Err(MatatuPersistenceError::duplicate_registration(
                draft.registration_number.clone(),
            ));
        }
        let matatu = Matatu {
            id: state.allocate_id(),
            registration_number: draft.registration_number.clone(),
            fleet_id: draft.fleet_id,
            pochi_number: draft.pochi_number.clone(),
            paybill_number: draft.paybill_number.clone(),
            till_number: draft.till_number.clone(),
            account_number: draft.account_number.clone(),
            send_money_phone: draft.send_money_phone.clone(),
            mpesa_option: draft.mpesa_option.clone(),
            route_start: draft.route_start.clone(),
            route_end: draft.route_end.clone(),
            vehicle_tag: draft.vehicle_tag.clone(),
            operator_id: draft.operator_id.clone(),
        };
        state.matatus.push(matatu.clone());
        Ok(matatu)
    }

    async fn find_by_id(&self, matatu_id: i32) -> Result<Option<Matatu>, MatatuPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .matatus
            .iter()
            .find(|matatu| matatu.id == matatu_id)
            .cloned())
    }

    async fn find_by_registration(
        &self,
        registration_number: &str,
    ) -> Result<Option<Matatu>, MatatuPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .matatus
            .iter()
            .find(|matatu| matatu.registration_number == registration_number)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Matatu>, MatatuPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(window(&state.matatus, page))
    }

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Matatu>, MatatuPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .matatus
            .iter()
            .filter(|matatu| matatu.operator_id == operator_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, matatu_id: i32) -> Result<(), MatatuPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if !state.matatus.iter().any(|matatu| matatu.id == matatu_id) {
            return Err(MatatuPersistenceError::NotFound { matatu_id });
        }
        state.matatus.retain(|matatu| matatu.id != matatu_id);
        Ok(())
    }
}

#[async_trait]
impl FareRepository for InMemoryRegistry {
    async fn create(&self, draft: &NewFare) -> Result<Fare, FarePersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let fare = Fare {
            id: state.allocate_id(),
            matatu_id: draft.matatu_id,
            peak_fare: draft.peak_fare,
            non_peak_fare: draft.non_peak_fare,
            rainy_peak_fare: draft.rainy_peak_fare,
            rainy_non_peak_fare: draft.rainy_non_peak_fare,
            disability_discount: draft.disability_discount,
        };
        state.fares.push(fare.clone());
        Ok(fare)
    }

    async fn list(&self, page: Page) -> Result<Vec<Fare>, FarePersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(window(&state.fares, page))
    }

    async fn list_for_matatu(&self, matatu_id: i32) -> Result<Vec<Fare>, FarePersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .fares
            .iter()
            .filter(|fare| fare.matatu_id == matatu_id)
            .cloned()
            .collect())
    }

    async fn update(&self, fare_id: i32, draft: &NewFare) -> Result<Fare, FarePersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let Some(fare) = state.fares.iter_mut().find(|fare| fare.id == fare_id) else {
            return Err(FarePersistenceError::NotFound { fare_id });
        };
        fare.matatu_id = draft.matatu_id;
        fare.peak_fare = draft.peak_fare;
        fare.non_peak_fare = draft.non_peak_fare;
        fare.rainy_peak_fare = draft.rainy_peak_fare;
        fare.rainy_non_peak_fare = draft.rainy_non_peak_fare;
        fare.disability_discount = draft.disability_discount;
        Ok(fare.clone())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRegistry {
    async fn create(&self, draft: &NewPayment) -> Result<Payment, PaymentPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let payment = Payment {
            id: state.allocate_id(),
            user_id: draft.user_id,
            matatu_id: draft.matatu_id,
            amount: draft.amount,
            route: draft.route.clone(),
            timestamp: Utc::now(),
            status: draft.status_or_default(),
            start_location: draft.start_location.clone(),
            end_location: draft.end_location.clone(),
            mpesa_receipt_number: draft.mpesa_receipt_number.clone(),
            payment_method: draft.payment_method.clone(),
            phone_number: draft.phone_number.clone(),
            fleet_id: draft.fleet_id,
        };
        state.payments.push(payment.clone());
        Ok(payment)
    }

    async fn list(&self, page: Page) -> Result<Vec<Payment>, PaymentPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(window(&state.payments, page))
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Payment>, PaymentPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .payments
            .iter()
            .filter(|payment| payment.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Hasher whose stored form is `hashed:<raw>`; deterministic for tests.
pub(crate) struct StubPasswordHasher;

impl PasswordHasher for StubPasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("hashed:{raw_password}"))
    }

    fn verify(&self, raw_password: &str, hashed_password: &str) -> Result<bool, PasswordHashError> {
        Ok(hashed_password == format!("hashed:{raw_password}"))
    }
}

/// Token issuer producing a recognisable fixture credential.
pub(crate) struct StubTokenIssuer;

impl TokenIssuer for StubTokenIssuer {
    fn issue(&self, user_id: i32) -> Result<String, TokenIssueError> {
        Ok(format!("token-for-{user_id}"))
    }
}

/// Build handler state over a fresh in-memory registry.
pub(crate) fn test_state() -> (actix_web::web::Data<HttpState>, Arc<InMemoryRegistry>) {
    let registry = Arc::new(InMemoryRegistry::default());
    let state = HttpState::new(
        registry.clone(),
        registry.clone(),
        registry.clone(),
        registry.clone(),
        registry.clone(),
        Arc::new(StubPasswordHasher),
        Arc::new(StubTokenIssuer),
    );
    (actix_web::web::Data::new(state), registry)
}

/// Build an app exposing the full `/api` surface over the given state.
pub(crate) fn test_app(
    state: actix_web::web::Data<HttpState>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .app_data(state)
        .service(crate::inbound::http::api_scope())
}
