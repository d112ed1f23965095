// src/middleware/auth.rs

use crate::models::auth::{Role, Session};

// Para onde mandar quem não pode ver a tela pedida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Forbidden,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Forbidden => "/forbidden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(Redirect),
}

/// Guardião de navegação. Função pura; deve ser reavaliada a cada navegação.
///
/// - sem sessão (ou token sem usuário legível) -> login
/// - `required_roles` não vazio e papel fora da lista -> forbidden
/// - caso contrário -> render
pub fn decide(session: &Session, required_roles: &[Role]) -> Decision {
    let Some(identity) = session.identity().filter(|_| session.authenticated()) else {
        return Decision::Redirect(Redirect::Login);
    };

    if !required_roles.is_empty() && !required_roles.contains(&identity.role) {
        return Decision::Redirect(Redirect::Forbidden);
    }

    Decision::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Identity;

    fn session_as(role: Role) -> Session {
        Session::new(
            Some(Identity {
                id_user: "1".into(),
                username: "u".into(),
                email: None,
                role,
                nama_lengkap: None,
            }),
            Some("tok".into()),
        )
    }

    #[test]
    fn anonymous_goes_to_login() {
        assert_eq!(decide(&Session::anonymous(), &[]), Decision::Redirect(Redirect::Login));
        assert_eq!(
            decide(&Session::anonymous(), &[Role::Admin]),
            Decision::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn wrong_role_is_forbidden_not_login() {
        let decision = decide(&session_as(Role::Retriever), &[Role::Admin]);
        assert_eq!(decision, Decision::Redirect(Redirect::Forbidden));
        assert_eq!(Redirect::Forbidden.path(), "/forbidden");
    }

    #[test]
    fn matching_role_renders() {
        assert_eq!(decide(&session_as(Role::Admin), &[Role::Admin]), Decision::Render);
        assert_eq!(
            decide(&session_as(Role::KepalaGudang), &[Role::Admin, Role::KepalaGudang]),
            Decision::Render
        );
    }

    #[test]
    fn no_required_roles_only_needs_a_session() {
        for role in Role::ALL {
            assert_eq!(decide(&session_as(role), &[]), Decision::Render);
        }
    }

    #[test]
    fn token_without_identity_goes_to_login() {
        let session = Session::new(None, Some("tok".into()));
        assert!(session.authenticated());
        assert_eq!(decide(&session, &[Role::Admin]), Decision::Redirect(Redirect::Login));
    }
}
