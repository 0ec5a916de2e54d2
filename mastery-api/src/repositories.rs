use crate::endpoints::{
    ChildId,
    auth::{ParentCheck, ParentLogin, ParentRegister, RefreshAccessToken},
    children::{LinkChild, ListChildren},
    insights::GetChildInsights,
};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn login(&self, username: impl Into<String>, password: impl Into<String>) -> ParentLogin {
        ParentLogin::new(username, password)
    }

    pub fn register(&self, username: impl Into<String>, email: impl Into<String>) -> ParentRegister {
        ParentRegister::new(username, email)
    }

    pub fn check(&self) -> ParentCheck {
        ParentCheck::new()
    }

    pub fn refresh(&self, refresh_token: impl Into<String>) -> RefreshAccessToken {
        RefreshAccessToken::new(refresh_token)
    }
}

pub struct ParentRepository;

impl ParentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn children(&self) -> ListChildren {
        ListChildren::new()
    }

    pub fn link_child(&self) -> LinkChild {
        LinkChild::new()
    }

    pub fn insights(&self, child_id: impl Into<ChildId>) -> GetChildInsights {
        GetChildInsights::new(child_id)
    }
}
