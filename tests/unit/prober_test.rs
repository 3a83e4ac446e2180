//! Tests for the prober: caching, dispatch and last-test info

use std::fs;

use htcap::core::models::{Capability, ProbeKey, Status, TestIdentity};
use htcap::prober::HtaccessProber;
use htcap::testers::{CapabilityTester, CrashTester, Tester};
use htcap::ProbeError;
use tempfile::TempDir;

use crate::common::{Canned, StubRequester, count_files, shared};

const BASE_URL: &str = "http://localhost/htcap";

fn prober_with(
    temp: &TempDir,
    stub: StubRequester,
) -> (std::sync::Arc<StubRequester>, HtaccessProber) {
    let (stub, requester) = shared(stub);
    let prober = HtaccessProber::new(temp.path(), BASE_URL).with_http_requester(requester);
    (stub, prober)
}

// =============================================================================
// CACHING
// =============================================================================

#[test]
fn test_same_question_is_asked_once() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "1")));

    assert_eq!(prober.can_rewrite().unwrap(), Status::Success);

    // A second run would recreate the fixture
    fs::remove_dir_all(temp.path().join("rewrite")).unwrap();

    assert_eq!(prober.can_rewrite().unwrap(), Status::Success);
    assert_eq!(stub.request_count(), 1);
    assert!(!temp.path().join("rewrite").exists());
}

#[test]
fn test_cached_result_restores_info() {
    let temp = TempDir::new().unwrap();
    let stub = StubRequester::always(Canned::new(200, "1"))
        .route("/rewrite/0.txt", Canned::new(200, "0"));
    let (_, mut prober) = prober_with(&temp, stub);

    assert_eq!(prober.can_rewrite().unwrap(), Status::Failure);
    let rewrite_info = prober.info_from_last_test().to_string();

    assert_eq!(prober.can_set_directory_index().unwrap(), Status::Success);
    assert_ne!(prober.info_from_last_test(), rewrite_info);

    assert_eq!(prober.can_rewrite().unwrap(), Status::Failure);
    assert_eq!(prober.info_from_last_test(), rewrite_info);
}

#[test]
fn test_different_modules_are_different_tests() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "1")));

    prober.module_loaded("rewrite").unwrap();
    prober.module_loaded("headers").unwrap();
    prober.module_loaded("rewrite").unwrap();

    assert_eq!(stub.request_count(), 2);
    assert!(temp.path().join("module-loaded/rewrite/.htaccess").exists());
    assert!(temp.path().join("module-loaded/headers/.htaccess").exists());
}

#[test]
fn test_tester_identity_is_structural() {
    let a = CapabilityTester::new("/srv/a", BASE_URL, Capability::Rewrite);
    let b = CapabilityTester::new("/srv/a", BASE_URL, Capability::Rewrite);
    let elsewhere = CapabilityTester::new("/srv/b", BASE_URL, Capability::Rewrite);

    assert_eq!(a.identity(), b.identity());
    assert_ne!(a.identity(), elsewhere.identity());
    assert_eq!(
        a.identity(),
        TestIdentity::new("/srv/a", BASE_URL, ProbeKey::Capability(Capability::Rewrite))
    );
}

#[test]
fn test_crash_identity_includes_subdir() {
    let rules = "Options -Indexes\n";
    let named = CrashTester::new("/srv", BASE_URL, rules, Some("a"));
    let other = CrashTester::new("/srv", BASE_URL, rules, Some("b"));
    let derived = CrashTester::new("/srv", BASE_URL, rules, None);
    let derived_again = CrashTester::new("/srv", BASE_URL, rules, None);

    assert_ne!(named.identity(), other.identity());
    assert_eq!(derived.identity(), derived_again.identity());
}

#[test]
fn test_crash_test_is_cached_per_subdir() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "thanks")));

    assert_eq!(prober.crash_test("Options -Indexes", Some("mine")).unwrap(), Status::Success);
    assert_eq!(prober.crash_test("Options -Indexes", Some("mine")).unwrap(), Status::Success);
    assert_eq!(stub.request_count(), 1);
    assert!(stub.requests()[0].ends_with("/crash-tests/mine/request-me.txt"));

    prober.crash_test("Options -Indexes", Some("yours")).unwrap();
    assert_eq!(stub.request_count(), 2);
}

#[test]
fn test_crash_test_reports_server_error() {
    let temp = TempDir::new().unwrap();
    let stub = StubRequester::always(Canned::new(500, "Internal Server Error"));
    let (_, mut prober) = prober_with(&temp, stub);

    assert_eq!(prober.crash_test("Bogus directive", None).unwrap(), Status::Failure);
    assert!(prober.info_from_last_test().contains("500"));
}

#[test]
fn test_crash_subdir_is_escaped_in_request_url() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "thanks")));

    prober.crash_test("Options -Indexes", Some("a#b")).unwrap();

    assert!(stub.requests()[0].ends_with("/crash-tests/a%23b/request-me.txt"));
    assert!(temp.path().join("crash-tests/a#b/request-me.txt").is_file());
}

#[test]
fn test_blank_crash_subdir_shares_the_derived_entry() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "thanks")));

    prober.crash_test("Options -Indexes", None).unwrap();
    prober.crash_test("Options -Indexes", Some("")).unwrap();

    assert_eq!(stub.request_count(), 1);
    assert!(!temp.path().join("crash-tests/.htaccess").exists());
}

// =============================================================================
// DISPATCH
// =============================================================================

#[test]
fn test_call_method_matches_named_method() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "0")));

    let by_name = prober.call_method("canSetDirectoryIndex()").unwrap();
    let direct = prober.can_set_directory_index().unwrap();

    assert_eq!(by_name, Status::Failure);
    assert_eq!(by_name, direct);
    // The second call was served from the cache: both routes share an identity
    assert_eq!(stub.request_count(), 1);
}

#[test]
fn test_call_method_module_loaded_argument() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "1")));

    assert_eq!(prober.call_method("moduleLoaded(headers)").unwrap(), Status::Success);
    assert_eq!(stub.requests(), vec![format!("{BASE_URL}/module-loaded/headers/")]);
}

#[test]
fn test_unsupported_method_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "1")));

    for name in ["canTeleport()", "crashTest()", "moduleLoaded(../etc)", ""] {
        let err = prober.call_method(name).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedMethod(_)), "{name}");
    }

    assert_eq!(stub.request_count(), 0);
    assert_eq!(count_files(temp.path()), 0);
    assert!(prober.cache().is_empty());
}

#[test]
fn test_invalid_module_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::always(Canned::new(200, "1")));

    assert!(matches!(prober.module_loaded("mod rewrite"), Err(ProbeError::InvalidModuleName(_))));
    assert_eq!(stub.request_count(), 0);
}

// =============================================================================
// TRANSPORT FAILURE
// =============================================================================

#[test]
fn test_transport_failure_keeps_probing_possible() {
    let temp = TempDir::new().unwrap();
    let (stub, mut prober) = prober_with(&temp, StubRequester::unreachable());

    assert_eq!(prober.htaccess_enabled().unwrap(), Status::Inconclusive);
    assert!(!prober.info_from_last_test().is_empty());

    // Inconclusive results are cached like any other
    assert_eq!(prober.htaccess_enabled().unwrap(), Status::Inconclusive);
    assert_eq!(stub.request_count(), 1);
}
