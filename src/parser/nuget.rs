use quick_xml::events::Event;
use quick_xml::Reader;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse NuGet manifest text. Two independent scans, concatenated:
/// `<package id=".." version=".." />` (packages.config) followed by
/// `<PackageReference Include=".." Version=".." />` (SDK-style project
/// files). Whichever shape the file actually uses contributes its entries.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let mut deps = scan_elements(content, "package", "id", "version");
    deps.extend(scan_elements(content, "PackageReference", "Include", "Version"));
    Ok(deps)
}

/// Collect `(name_attr, version_attr)` pairs from every element named `tag`.
fn scan_elements(content: &str, tag: &str, name_attr: &str, version_attr: &str) -> Vec<Dependency> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut deps = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let elem = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if elem == tag {
                    let mut name = String::new();
                    let mut version = String::new();
                    for attr in e.attributes().flatten() {
                        let key =
                            String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                        let val = attr.unescape_value().unwrap_or_default().into_owned();
                        if key == name_attr {
                            name = val;
                        } else if key == version_attr {
                            version = val;
                        }
                    }
                    if !name.is_empty() {
                        let version = clean_version(&version);
                        let version = if version.is_empty() {
                            LATEST.to_string()
                        } else {
                            version
                        };
                        deps.push(Dependency { name, version });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    deps
}
