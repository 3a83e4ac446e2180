//! Built-in probe definitions
//!
//! Each capability question maps to a fixed `.htaccess` fragment, a few
//! companion files and the rules that read the answer out of the response.
//! Decision boundaries differ per probe; see the table in DESIGN.md.

use sha2::{Digest, Sha256};

use crate::core::models::{
    Capability, Condition, FixtureFile, Interpretation, Status, TestDefinition,
};

/// Parent directory of all crash-test fixtures
pub const CRASH_TEST_DIR: &str = "crash-tests";

/// Body of the plain file requested by header/type probes
const REQUEST_ME: &str = "thanks";

/// The fixture and interpretation rules for a built-in capability
#[must_use]
pub fn definition(capability: &Capability) -> TestDefinition {
    match capability {
        Capability::HtaccessEnabled => htaccess_enabled(),
        Capability::ModuleLoaded(name) => module_loaded(name),
        Capability::Rewrite => rewrite(),
        Capability::AddType => add_type(),
        Capability::SetResponseHeader => set_response_header(),
        Capability::SetRequestHeader => set_request_header(),
        Capability::ContentDigest => content_digest(),
        Capability::SetServerSignature => server_signature(),
        Capability::SetDirectoryIndex => directory_index(),
        Capability::PassEnvThroughRequestHeader => pass_env_through_request_header(),
        Capability::PassEnvThroughRewrite => pass_env_through_rewrite(),
    }
}

/// Subdirectory used when a crash test is run without one
///
/// Derived from the rules so identical rules share a directory and a cache entry.
#[must_use]
pub fn crash_subdir(rules: &str) -> String {
    let digest = Sha256::digest(rules.as_bytes());
    hex::encode(&digest[..8])
}

/// Crash test: does the server survive `rules`?
///
/// A 500 means the rules broke the directory; a 404 means the fixture is not
/// reachable at all, so nothing can be concluded.
#[must_use]
pub fn crash_test(rules: &str, subdir: &str) -> TestDefinition {
    TestDefinition {
        subdir: format!("{CRASH_TEST_DIR}/{subdir}"),
        files: vec![file(".htaccess", rules), file("request-me.txt", REQUEST_ME)],
        request: "request-me.txt".to_string(),
        interpretation: vec![
            rule(Status::Failure, Condition::StatusEquals { value: 500 })
                .with_note("the rules caused a server error (status code: 500)"),
            rule(Status::Inconclusive, Condition::StatusEquals { value: 404 })
                .with_note("the crash-test fixture was not found (status code: 404)"),
            rule(Status::Success, Condition::StatusNotEquals { value: 500 }),
        ],
    }
}

// =============================================================================
// Individual probes
// =============================================================================

fn htaccess_enabled() -> TestDefinition {
    // An unknown directive is a hard error, but only if the file is read at all
    TestDefinition {
        subdir: "htaccess-enabled".to_string(),
        files: vec![
            file(".htaccess", "HtcapInvalidDirective on\n"),
            file("request-me.txt", REQUEST_ME),
        ],
        request: "request-me.txt".to_string(),
        interpretation: vec![
            rule(Status::Success, Condition::StatusEquals { value: 500 })
                .with_note(".htaccess is processed (an invalid directive caused status code 500)"),
            rule(Status::Failure, Condition::StatusEquals { value: 200 })
                .with_note(".htaccess is ignored (an invalid directive went unnoticed)"),
        ],
    }
}

fn module_loaded(name: &str) -> TestDefinition {
    let htaccess = format!(
        "<IfModule mod_{name}.c>\n    DirectoryIndex 1.txt\n</IfModule>\n\
         <IfModule !mod_{name}.c>\n    DirectoryIndex 0.txt\n</IfModule>\n"
    );
    TestDefinition {
        subdir: format!("module-loaded/{name}"),
        files: vec![file(".htaccess", &htaccess), file("0.txt", "0"), file("1.txt", "1")],
        request: String::new(),
        interpretation: vec![
            rule(Status::Success, body_equals("1")),
            rule(Status::Failure, body_equals("0")),
        ],
    }
}

fn rewrite() -> TestDefinition {
    let htaccess = "<IfModule mod_rewrite.c>\n    RewriteEngine On\n    \
                    RewriteRule ^0\\.txt$ 1.txt [L]\n</IfModule>\n";
    TestDefinition {
        subdir: "rewrite".to_string(),
        files: vec![file(".htaccess", htaccess), file("0.txt", "0"), file("1.txt", "1")],
        request: "0.txt".to_string(),
        interpretation: vec![
            rule(Status::Success, body_equals("1")),
            rule(Status::Failure, body_equals("0")),
        ],
    }
}

fn add_type() -> TestDefinition {
    let htaccess = "<IfModule mod_mime.c>\n    AddType image/gif .test\n</IfModule>\n";
    TestDefinition {
        subdir: "add-type".to_string(),
        files: vec![file(".htaccess", htaccess), file("request-me.test", REQUEST_ME)],
        request: "request-me.test".to_string(),
        interpretation: header_probe_rules(Condition::HeaderContains {
            name: "Content-Type".to_string(),
            value: "image/gif".to_string(),
        }),
    }
}

fn set_response_header() -> TestDefinition {
    let htaccess = "<IfModule mod_headers.c>\n    \
                    Header set X-Response-Header-Test: test\n</IfModule>\n";
    TestDefinition {
        subdir: "set-response-header".to_string(),
        files: vec![file(".htaccess", htaccess), file("request-me.txt", REQUEST_ME)],
        request: "request-me.txt".to_string(),
        interpretation: header_probe_rules(Condition::HeaderEquals {
            name: "X-Response-Header-Test".to_string(),
            value: "test".to_string(),
        }),
    }
}

fn content_digest() -> TestDefinition {
    TestDefinition {
        subdir: "content-digest".to_string(),
        files: vec![file(".htaccess", "ContentDigest On\n"), file("request-me.txt", REQUEST_ME)],
        request: "request-me.txt".to_string(),
        interpretation: header_probe_rules(Condition::HeaderExists {
            name: "Content-MD5".to_string(),
        }),
    }
}

fn directory_index() -> TestDefinition {
    let htaccess = "<IfModule mod_dir.c>\n    DirectoryIndex index2.html\n</IfModule>\n";
    TestDefinition {
        subdir: "directory-index".to_string(),
        files: vec![
            file(".htaccess", htaccess),
            file("index.html", "0"),
            file("index2.html", "1"),
        ],
        request: String::new(),
        interpretation: vec![
            rule(Status::Success, body_equals("1")),
            rule(Status::Failure, body_equals("0")),
            server_error_is_failure(),
        ],
    }
}

fn set_request_header() -> TestDefinition {
    let htaccess = "<IfModule mod_headers.c>\n    \
                    RequestHeader set User-Agent \"request-header-test\"\n</IfModule>\n";
    let script = "<?php\n\
                  $ua = isset($_SERVER['HTTP_USER_AGENT']) ? $_SERVER['HTTP_USER_AGENT'] : '';\n\
                  echo ($ua == 'request-header-test') ? 1 : 0;\n";
    script_probe("set-request-header", htaccess, script)
}

fn server_signature() -> TestDefinition {
    let script = "<?php\n\
                  echo (isset($_SERVER['SERVER_SIGNATURE']) && \
                  $_SERVER['SERVER_SIGNATURE'] != '') ? 1 : 0;\n";
    script_probe("server-signature", "ServerSignature On\n", script)
}

fn pass_env_through_request_header() -> TestDefinition {
    let htaccess = "<IfModule mod_rewrite.c>\n    RewriteEngine On\n    \
                    RewriteRule ^ - [E=PASSTHROUGHHEADER:1]\n\
                    <IfModule mod_headers.c>\n        \
                    RequestHeader set PASSTHROUGHHEADER \
                    \"%{PASSTHROUGHHEADER}e\" env=PASSTHROUGHHEADER\n    \
                    </IfModule>\n</IfModule>\n";
    let script = "<?php\n\
                  echo (isset($_SERVER['HTTP_PASSTHROUGHHEADER']) && \
                  $_SERVER['HTTP_PASSTHROUGHHEADER'] == '1') ? 1 : 0;\n";
    script_probe("pass-env-through-request-header", htaccess, script)
}

fn pass_env_through_rewrite() -> TestDefinition {
    let htaccess = "<IfModule mod_rewrite.c>\n    RewriteEngine On\n    \
                    RewriteRule ^ - [E=PASSTHROUGHREWRITE:1]\n</IfModule>\n";
    let script = "<?php\n\
                  function htcapEnv($name) {\n    \
                  if (getenv($name) !== false) { return getenv($name); }\n    \
                  if (isset($_SERVER[$name])) { return $_SERVER[$name]; }\n    \
                  if (isset($_SERVER['REDIRECT_' . $name])) { \
                  return $_SERVER['REDIRECT_' . $name]; }\n    \
                  return false;\n}\n\
                  echo (htcapEnv('PASSTHROUGHREWRITE') === '1') ? 1 : 0;\n";
    script_probe("pass-env-through-rewrite", htaccess, script)
}

// =============================================================================
// Shared shapes
// =============================================================================

/// A probe answered by a PHP script printing `1` or `0`
///
/// An unexecuted script (source echoed back) says nothing about the directive.
fn script_probe(subdir: &str, htaccess: &str, script: &str) -> TestDefinition {
    TestDefinition {
        subdir: subdir.to_string(),
        files: vec![file(".htaccess", htaccess), file("test.php", script)],
        request: "test.php".to_string(),
        interpretation: vec![
            rule(Status::Inconclusive, Condition::BodyBeginsWith {
                value: "<?php".to_string(),
            })
            .with_note("PHP is not executed in the test directory"),
            rule(Status::Success, body_equals("1")),
            rule(Status::Failure, body_equals("0")),
            server_error_is_failure(),
        ],
    }
}

/// Success when `marker` shows up; a plain 200 without it is a failure
fn header_probe_rules(marker: Condition) -> Vec<Interpretation> {
    vec![
        rule(Status::Success, marker),
        server_error_is_failure(),
        rule(Status::Failure, Condition::StatusEquals { value: 200 }),
    ]
}

fn server_error_is_failure() -> Interpretation {
    rule(Status::Failure, Condition::StatusEquals { value: 500 })
        .with_note("the directive caused a server error (status code: 500)")
}

fn body_equals(value: &str) -> Condition {
    Condition::BodyEquals {
        value: value.to_string(),
    }
}

fn rule(outcome: Status, condition: Condition) -> Interpretation {
    Interpretation::new(outcome, condition)
}

fn file(path: &str, content: &str) -> FixtureFile {
    FixtureFile {
        path: path.to_string(),
        content: content.to_string(),
    }
}
