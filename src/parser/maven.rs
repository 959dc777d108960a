use quick_xml::events::Event;
use quick_xml::Reader;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse `pom.xml`-style text: every `<dependency>` block inside a
/// `<dependencies>` element yields one entry named `groupId:artifactId`,
/// in document order. Malformed XML past the last readable event simply
/// ends extraction; Maven parsing is pattern-based, not strict.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut deps = Vec::new();
    let mut buf = Vec::new();

    let mut in_dependencies = false;
    let mut depth: u32 = 0;
    let mut dependencies_depth: u32 = 0;

    let mut in_dependency = false;
    let mut in_exclusions = false;
    let mut current_tag = String::new();
    let mut group_id = String::new();
    let mut artifact_id = String::new();
    let mut version = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                current_tag = name.clone();

                match name.as_str() {
                    "dependencies" if !in_dependency => {
                        in_dependencies = true;
                        dependencies_depth = depth;
                    }
                    "dependency" if in_dependencies => {
                        in_dependency = true;
                        in_exclusions = false;
                        group_id.clear();
                        artifact_id.clear();
                        version.clear();
                    }
                    // <exclusions> nests its own groupId/artifactId pairs;
                    // they must not overwrite the dependency's coordinates
                    "exclusions" if in_dependency => {
                        in_exclusions = true;
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();

                if name == "exclusions" && in_dependency {
                    in_exclusions = false;
                } else if name == "dependency" && in_dependency {
                    if !artifact_id.is_empty() {
                        deps.push(make_dep(&group_id, &artifact_id, &version));
                    }
                    in_dependency = false;
                } else if name == "dependencies" && depth == dependencies_depth {
                    in_dependencies = false;
                }

                depth = depth.saturating_sub(1);
                current_tag.clear();
            }
            Ok(Event::Text(ref e)) => {
                if in_dependency && !in_exclusions {
                    let text = e.unescape().unwrap_or_default();
                    match current_tag.as_str() {
                        "groupId" => group_id = text.to_string(),
                        "artifactId" => artifact_id = text.to_string(),
                        "version" => version = text.to_string(),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(deps)
}

fn make_dep(group_id: &str, artifact_id: &str, version: &str) -> Dependency {
    // "group:artifact" keeps the Maven coordinates in the name
    let name = if group_id.is_empty() {
        artifact_id.to_string()
    } else {
        format!("{group_id}:{artifact_id}")
    };
    let version = clean_version(version);
    let version = if version.is_empty() {
        LATEST.to_string()
    } else {
        version
    };
    Dependency { name, version }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependency_blocks_in_order() {
        let xml = r#"<?xml version="1.0"?>
<project>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>3.12.0</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
    </dependency>
  </dependencies>
</project>"#;
        let deps = parse(xml).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0], Dependency::new("org.apache.commons:commons-lang3", "3.12.0"));
        assert_eq!(deps[1], Dependency::new("junit:junit", "4.13.2"));
    }

    #[test]
    fn test_parse_keeps_coordinates_past_exclusions() {
        let xml = r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.apache.hadoop</groupId>
      <artifactId>hadoop-client</artifactId>
      <version>3.3.6</version>
      <exclusions>
        <exclusion>
          <groupId>log4j</groupId>
          <artifactId>log4j</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
    <dependency>
      <groupId>com.google.guava</groupId>
      <artifactId>guava</artifactId>
      <version>32.1.2-jre</version>
    </dependency>
  </dependencies>
</project>"#;
        let deps = parse(xml).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("org.apache.hadoop:hadoop-client", "3.3.6"),
                Dependency::new("com.google.guava:guava", "32.1.2-jre"),
            ]
        );
    }

    #[test]
    fn test_parse_versionless_dependency_becomes_latest() {
        let xml = r#"<project><dependencies><dependency>
  <groupId>com.example</groupId>
  <artifactId>managed</artifactId>
</dependency></dependencies></project>"#;
        let deps = parse(xml).unwrap();
        assert_eq!(deps, vec![Dependency::new("com.example:managed", "latest")]);
    }

    #[test]
    fn test_parse_ignores_tags_outside_dependencies() {
        let xml = r#"<project>
  <groupId>com.example</groupId>
  <artifactId>my-app</artifactId>
  <version>1.0.0</version>
  <dependencies>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
      <version>2.0.7</version>
    </dependency>
  </dependencies>
</project>"#;
        let deps = parse(xml).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "org.slf4j:slf4j-api");
    }
}
