//! Payment events fed to the state machine.

use yem_core::amount::Money;

/// A payment by `user` for an action on `resource`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<U, R, A = Money> {
    Upvote { user: U, payment: A, resource: R },
    View { user: U, payment: A, resource: R },
}

impl<U, R, A> Event<U, R, A> {
    pub fn upvote(user: U, payment: A, resource: R) -> Self {
        Event::Upvote {
            user,
            payment,
            resource,
        }
    }

    pub fn view(user: U, payment: A, resource: R) -> Self {
        Event::View {
            user,
            payment,
            resource,
        }
    }

    /// Short label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Upvote { .. } => "upvote",
            Event::View { .. } => "view",
        }
    }

    pub fn user(&self) -> &U {
        match self {
            Event::Upvote { user, .. } | Event::View { user, .. } => user,
        }
    }

    pub fn resource(&self) -> &R {
        match self {
            Event::Upvote { resource, .. } | Event::View { resource, .. } => resource,
        }
    }

    pub fn payment(&self) -> &A {
        match self {
            Event::Upvote { payment, .. } | Event::View { payment, .. } => payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yem_core::amount::whole;

    #[test]
    fn accessors() {
        let e: Event<&str, &str> = Event::view("carol", whole(2), "post");
        assert_eq!(e.kind(), "view");
        assert_eq!(*e.user(), "carol");
        assert_eq!(*e.resource(), "post");
        assert_eq!(*e.payment(), whole(2));
        assert_eq!(Event::<&str, &str>::upvote("a", whole(1), "r").kind(), "upvote");
    }
}
