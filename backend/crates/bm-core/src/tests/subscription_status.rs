use crate::SubscriptionStatus;

#[test]
fn test_subscription_status_displays_as_str() {
    for status in [
        SubscriptionStatus::Connecting,
        SubscriptionStatus::Subscribed,
        SubscriptionStatus::Closed,
        SubscriptionStatus::Errored,
    ] {
        assert_eq!(status.to_string(), status.as_str());
    }
    assert_eq!(SubscriptionStatus::Errored.to_string(), "errored");
}

#[test]
fn test_only_subscribed_is_online() {
    assert!(SubscriptionStatus::Subscribed.is_online());
    assert!(!SubscriptionStatus::Connecting.is_online());
    assert!(SubscriptionStatus::Closed.is_terminal());
    assert!(SubscriptionStatus::Errored.is_terminal());
    assert!(!SubscriptionStatus::default().is_terminal());
}
