//! Shared fixtures for integration tests.
//!
//! The same mapping document in every supported format:
//!
//! | # | pattern                              | implicit                                   | override    | ignore  |
//! |---|--------------------------------------|--------------------------------------------|-------------|---------|
//! | 0 | `/{root}/book/{bookId}`              | template=Book.vm, detail=0                 |             |         |
//! | 1 | `/{root}/book/{bookId}/{detail}`     | template=Book.vm                           |             |         |
//! | 2 | `/{root}/{id}/{role}/{language}`     | template=default.vm, media-type=html       |             |         |
//! | 3 | `/{root}/register`                   | template=Registerone.vm, media-type, js_pane |           |         |
//! | 4 | `/{root}/contact`                    | page=Contact, media-type, js_pane, role=anon | role=anon |         |
//! | 5 | `/{root}/search/{q}`                 |                                            |             | session |

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const JSON: &str = r#"{
  "name": "default",
  "maps": [
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/book/(?<bookId>\\d+)",
      "implicit": { "template": "Book.vm", "detail": "0" }
    },
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/book/(?<bookId>\\d+)/(?<detail>\\d+)",
      "implicit": { "template": "Book.vm" }
    },
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/(?<id>\\d+)/(?<role>\\w+)/(?<language>\\w+)",
      "implicit": { "template": "default.vm", "media-type": "html" }
    },
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/register",
      "implicit": { "template": "Registerone.vm", "media-type": "html", "js_pane": "random-id-123-abc" }
    },
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/contact",
      "implicit": { "page": "Contact", "media-type": "html", "js_pane": "another-random-id-876-dfg", "role": "anon" },
      "override": { "role": "anon" }
    },
    {
      "pattern": "/(?<webAppRoot>[.\\w-]+)/search/(?<q>\\w+)",
      "ignore": { "session": "per-user, never part of the link" }
    }
  ]
}
"#;

pub const YAML: &str = r#"
name: default
maps:
  - pattern: '/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)'
    implicit:
      template: Book.vm
      detail: "0"
  - pattern: '/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)/(?<detail>\d+)'
    implicit:
      template: Book.vm
  - pattern: '/(?<webAppRoot>[.\w-]+)/(?<id>\d+)/(?<role>\w+)/(?<language>\w+)'
    implicit:
      template: default.vm
      media-type: html
  - pattern: '/(?<webAppRoot>[.\w-]+)/register'
    implicit:
      template: Registerone.vm
      media-type: html
      js_pane: random-id-123-abc
  - pattern: '/(?<webAppRoot>[.\w-]+)/contact'
    implicit:
      page: Contact
      media-type: html
      js_pane: another-random-id-876-dfg
      role: anon
    override:
      role: anon
  - pattern: '/(?<webAppRoot>[.\w-]+)/search/(?<q>\w+)'
    ignore:
      session: per-user, never part of the link
"#;

pub const TOML: &str = r#"
name = "default"

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)'
implicit = { template = "Book.vm", detail = "0" }

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)/(?<detail>\d+)'
implicit = { template = "Book.vm" }

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/(?<id>\d+)/(?<role>\w+)/(?<language>\w+)'
implicit = { template = "default.vm", "media-type" = "html" }

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/register'
implicit = { template = "Registerone.vm", "media-type" = "html", js_pane = "random-id-123-abc" }

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/contact'
implicit = { page = "Contact", "media-type" = "html", js_pane = "another-random-id-876-dfg", role = "anon" }
override = { role = "anon" }

[[maps]]
pattern = '/(?<webAppRoot>[.\w-]+)/search/(?<q>\w+)'
ignore = { session = "per-user, never part of the link" }
"#;

pub const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<url-mapping name="default">
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)]]></pattern>
    <implicit-parameters>
      <parameter key="template">Book.vm</parameter>
      <parameter key="detail">0</parameter>
    </implicit-parameters>
  </map>
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/book/(?<bookId>\d+)/(?<detail>\d+)]]></pattern>
    <implicit-parameters>
      <parameter key="template">Book.vm</parameter>
    </implicit-parameters>
  </map>
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/(?<id>\d+)/(?<role>\w+)/(?<language>\w+)]]></pattern>
    <implicit-parameters>
      <parameter key="template">default.vm</parameter>
      <parameter key="media-type">html</parameter>
    </implicit-parameters>
  </map>
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/register]]></pattern>
    <implicit-parameters>
      <parameter key="template">Registerone.vm</parameter>
      <parameter key="media-type">html</parameter>
      <parameter key="js_pane">random-id-123-abc</parameter>
    </implicit-parameters>
  </map>
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/contact]]></pattern>
    <implicit-parameters>
      <parameter key="page">Contact</parameter>
      <parameter key="media-type">html</parameter>
      <parameter key="js_pane">another-random-id-876-dfg</parameter>
      <parameter key="role">anon</parameter>
    </implicit-parameters>
    <override-parameters>
      <parameter key="role">anon</parameter>
    </override-parameters>
  </map>
  <map>
    <pattern><![CDATA[/(?<webAppRoot>[.\w-]+)/search/(?<q>\w+)]]></pattern>
    <ignore-parameters>
      <parameter key="session">per-user, never part of the link</parameter>
    </ignore-parameters>
  </map>
</url-mapping>
"#;

/// All fixtures with the file extension that selects their format.
pub fn all_formats() -> [(&'static str, &'static str); 5] {
    [
        ("json", JSON),
        ("yml", YAML),
        ("yaml", YAML),
        ("toml", TOML),
        ("xml", XML),
    ]
}

/// One book entry whose parameter values are written unquoted where the
/// format allows it.
pub fn unquoted_value_formats() -> [(&'static str, &'static str); 4] {
    [
        (
            "json",
            r#"{"maps":[{"pattern":"/(?<webAppRoot>\\w+)/book/(?<bookId>\\d+)","implicit":{"detail":0,"cache":true},"override":{"page":1}}]}"#,
        ),
        (
            "yml",
            "maps:\n  - pattern: '/(?<webAppRoot>\\w+)/book/(?<bookId>\\d+)'\n    implicit:\n      detail: 0\n      cache: true\n    override:\n      page: 1\n",
        ),
        (
            "toml",
            "[[maps]]\npattern = '/(?<webAppRoot>\\w+)/book/(?<bookId>\\d+)'\nimplicit = { detail = 0, cache = true }\noverride = { page = 1 }\n",
        ),
        (
            "xml",
            r#"<url-mapping><map><pattern>/(?&lt;webAppRoot&gt;\w+)/book/(?&lt;bookId&gt;\d+)</pattern><implicit-parameters><parameter key="detail">0</parameter><parameter key="cache">true</parameter></implicit-parameters><override-parameters><parameter key="page">1</parameter></override-parameters></map></url-mapping>"#,
        ),
    ]
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `content` to a fresh file with the given extension in a per-test directory.
pub fn write_fixture(extension: &str, content: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("url-mapper-test-{}-{}", std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join(format!("url-mapping.{}", extension));
    std::fs::write(&path, content).unwrap();
    path
}

/// Remove a fixture written by [`write_fixture`] together with its directory.
pub fn remove_fixture(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).unwrap_or_default();
    }
}
