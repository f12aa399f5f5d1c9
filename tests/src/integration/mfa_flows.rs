//! # MFA Journey Tests
//!
//! Exercises the registry and the derived session state machine together:
//! the first-time and returning-user paths, and the documented behavior of
//! racing setup requests against the in-memory store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use signet_mfa::domain::totp::code_at;
    use signet_mfa::{InMemoryMfaStore, MfaApi, MfaRegistry, MfaState, SessionView};

    const USER: &str = "journey@example.com";
    const T0: u64 = 1_700_000_000;

    fn registry() -> MfaRegistry<InMemoryMfaStore> {
        MfaRegistry::new(InMemoryMfaStore::new())
    }

    fn view(registry: &MfaRegistry<InMemoryMfaStore>, passed: bool) -> SessionView {
        SessionView {
            logged_in: true,
            mfa_enabled: registry.is_enabled(USER),
            second_factor_passed: passed,
        }
    }

    #[test]
    fn first_time_user_walks_setup_to_enabled() {
        let registry = registry();

        // Before login nothing applies
        assert_eq!(
            MfaState::derive(SessionView::default()),
            MfaState::Disabled
        );

        // Fresh login: no MFA on record, so the user lands in setup
        assert_eq!(MfaState::derive(view(&registry, false)), MfaState::Setup);

        // Enrol and confirm with a code for the pending secret
        let provisioned = registry.generate_secret(USER).unwrap();
        let code = code_at(registry.config(), &provisioned.secret, USER, T0).unwrap();
        assert!(registry.verify_setup_code_at(USER, &code, T0).unwrap());

        // The accepted code grants access this session
        assert_eq!(MfaState::derive(view(&registry, true)), MfaState::Enabled);
    }

    #[test]
    fn returning_user_walks_verification_to_enabled() {
        let registry = registry();

        // Enrolment happened in some earlier session
        let provisioned = registry.generate_secret(USER).unwrap();
        let code = code_at(registry.config(), &provisioned.secret, USER, T0).unwrap();
        assert!(registry.verify_setup_code_at(USER, &code, T0).unwrap());

        // New session: the registry remembers, so a login code is demanded
        assert_eq!(
            MfaState::derive(view(&registry, false)),
            MfaState::Verification
        );

        // A wrong code leaves the user at verification
        let login = code_at(registry.config(), &provisioned.secret, USER, T0 + 60).unwrap();
        let wrong: String = login
            .chars()
            .enumerate()
            .map(|(i, c)| if i == 0 { if c == '9' { '0' } else { '9' } } else { c })
            .collect();
        assert!(!registry.verify_login_code_at(USER, &wrong, T0 + 60).unwrap());
        assert_eq!(
            MfaState::derive(view(&registry, false)),
            MfaState::Verification
        );

        // The right code passes and the state machine opens the gate
        assert!(registry.verify_login_code_at(USER, &login, T0 + 60).unwrap());
        assert_eq!(MfaState::derive(view(&registry, true)), MfaState::Enabled);
    }

    #[test]
    fn disabling_returns_the_user_to_the_setup_path() {
        let registry = registry();
        let provisioned = registry.generate_secret(USER).unwrap();
        let code = code_at(registry.config(), &provisioned.secret, USER, T0).unwrap();
        assert!(registry.verify_setup_code_at(USER, &code, T0).unwrap());
        assert_eq!(
            MfaState::derive(view(&registry, false)),
            MfaState::Verification
        );

        assert!(registry.disable(USER));
        assert_eq!(MfaState::derive(view(&registry, false)), MfaState::Setup);
    }

    #[test]
    fn racing_setups_leave_exactly_one_live_pending_secret() {
        let registry = Arc::new(registry());

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.generate_secret(USER).unwrap())
            })
            .collect();
        let issued: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // The record is well-formed whichever write landed last
        let status = registry.status(USER);
        assert!(!status.enabled);
        assert!(status.has_secret);

        // Trying both issued secrets in sequence must enable MFA: the live
        // one verifies, and once promoted the other cannot
        let accepted = issued.iter().any(|provisioned| {
            let code = code_at(registry.config(), &provisioned.secret, USER, T0).unwrap();
            registry.verify_setup_code_at(USER, &code, T0).unwrap()
        });
        assert!(accepted, "neither issued secret verified");
        assert!(registry.is_enabled(USER));
    }
}
