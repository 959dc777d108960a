use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::ecosystems::{classify_filename, is_nuget_project_file};
use crate::error::ScanError;
use crate::models::{DetectedFile, Ecosystem, FileType, ProjectStructure, Subproject};
use crate::sniffer::ContentSniffer;
use crate::walker::FileSystemWalker;

/// Base confidence at depth 0, per file type.
const PRIMARY_BASE: f64 = 0.9;
const LOCKFILE_BASE: f64 = 0.7;
const CONFIG_BASE: f64 = 0.3;

/// Confidence lost per level of depth.
const PRIMARY_DECAY: f64 = 0.2;
const LOCKFILE_DECAY: f64 = 0.2;
const CONFIG_DECAY: f64 = 0.1;

/// Lower bounds the decay never crosses.
const PRIMARY_FLOOR: f64 = 0.5;
const LOCKFILE_FLOOR: f64 = 0.3;
const CONFIG_FLOOR: f64 = 0.1;

/// Confidence differences within this tolerance are treated as ties and
/// resolved by path depth, then by ecosystem preference order.
const CONFIDENCE_TOLERANCE: f64 = 0.05;

/// Confidence for a file of `file_type` found `depth` levels below the root.
fn confidence_at(file_type: FileType, depth: usize) -> f64 {
    let (base, decay, floor) = match file_type {
        FileType::Primary => (PRIMARY_BASE, PRIMARY_DECAY, PRIMARY_FLOOR),
        FileType::Lockfile => (LOCKFILE_BASE, LOCKFILE_DECAY, LOCKFILE_FLOOR),
        FileType::Config => (CONFIG_BASE, CONFIG_DECAY, CONFIG_FLOOR),
    };
    if depth == 0 {
        base
    } else {
        (base - depth as f64 * decay).max(floor)
    }
}

/// Locates candidate manifests under a project root and ranks them.
pub struct Detector {
    root: PathBuf,
    max_depth: usize,
    walker: FileSystemWalker,
}

impl Detector {
    pub fn new(root: impl Into<PathBuf>, max_depth: usize) -> Self {
        Self {
            root: root.into(),
            max_depth,
            walker: FileSystemWalker::new(),
        }
    }

    pub fn with_walker(root: impl Into<PathBuf>, max_depth: usize, walker: FileSystemWalker) -> Self {
        Self {
            root: root.into(),
            max_depth,
            walker,
        }
    }

    /// Classify one directory entry by filename. Project files named after
    /// the project (`.csproj`, `.sln`, ...) always count as NuGet primaries.
    fn classify_entry(path: &Path, depth: usize) -> Option<DetectedFile> {
        let file_name = path.file_name()?.to_str()?;
        let (ecosystem, file_type) = match classify_filename(file_name) {
            Some(hit) => hit,
            None if is_nuget_project_file(file_name) => (Ecosystem::Nuget, FileType::Primary),
            None => return None,
        };
        Some(DetectedFile {
            path: path.to_path_buf(),
            ecosystem,
            confidence: confidence_at(file_type, depth),
            file_type,
        })
    }

    /// Scan for candidate manifests. Depth 0 is checked first; only when it
    /// yields nothing does the search descend to `max_depth`. Absence of
    /// candidates is a valid empty result, never an error.
    pub fn detect_files(&self) -> Vec<DetectedFile> {
        let mut found: Vec<DetectedFile> = self
            .walker
            .list_dir(&self.root)
            .iter()
            .filter_map(|p| Self::classify_entry(p, 0))
            .collect();

        if found.is_empty() {
            for listing in self.walker.scan(&self.root, self.max_depth) {
                if listing.depth == 0 {
                    continue;
                }
                found.extend(
                    listing
                        .files
                        .iter()
                        .filter_map(|p| Self::classify_entry(p, listing.depth)),
                );
            }
        }

        // Walk order already follows depth, but re-sorting keeps the ranking
        // independent of traversal completion order.
        found.sort_by(rank);
        found
    }

    /// Classify a single explicit path: registry filename match first, then
    /// the NuGet project-file extensions, then content sniffing.
    ///
    /// `Ok(None)` means no signature matched — a normal outcome. An
    /// unreadable file is likewise skipped rather than raised.
    pub fn detect_file(&self, path: &Path) -> Result<Option<DetectedFile>, ScanError> {
        if !path.exists() {
            return Err(ScanError::FileNotFound(path.to_path_buf()));
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(detected) = Self::classify_entry(&path, 0) {
            return Ok(Some(detected));
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Ok(None),
        };
        Ok(ContentSniffer::sniff(&content).map(|(ecosystem, confidence, file_type)| {
            DetectedFile {
                path,
                ecosystem,
                confidence,
                file_type,
            }
        }))
    }

    /// Pick the single best candidate, optionally narrowed to one ecosystem.
    /// The hint is ignored when it would leave no candidates.
    pub fn best_file(
        candidates: &[DetectedFile],
        ecosystem_hint: Option<Ecosystem>,
    ) -> Option<DetectedFile> {
        if candidates.is_empty() {
            return None;
        }

        let mut pool: Vec<&DetectedFile> = match ecosystem_hint {
            Some(hint) => {
                let filtered: Vec<&DetectedFile> =
                    candidates.iter().filter(|f| f.ecosystem == hint).collect();
                if filtered.is_empty() {
                    candidates.iter().collect()
                } else {
                    filtered
                }
            }
            None => candidates.iter().collect(),
        };

        pool.sort_by(|a, b| rank(a, b));
        pool.first().map(|f| (*f).clone())
    }

    /// Derive the project layout from a detection pass. A monorepo is any
    /// tree where more than one directory holds a primary manifest.
    pub fn project_structure(&self, files: &[DetectedFile]) -> ProjectStructure {
        // BTreeMap keeps subproject order stable across scans.
        let mut by_dir: BTreeMap<PathBuf, Vec<&DetectedFile>> = BTreeMap::new();
        for file in files {
            let dir = file
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            by_dir.entry(dir).or_default().push(file);
        }

        let mut subprojects = Vec::new();
        for (dir, entries) in &by_dir {
            let mut primaries: Vec<&&DetectedFile> = entries
                .iter()
                .filter(|f| f.file_type == FileType::Primary)
                .collect();
            if primaries.is_empty() {
                continue;
            }
            primaries.sort_by(|a, b| rank(a, b));
            subprojects.push(Subproject {
                path: dir.clone(),
                ecosystem: primaries[0].ecosystem,
                file_count: entries.len(),
            });
        }

        let root_ecosystem = subprojects
            .iter()
            .find(|s| s.path == self.root)
            .map(|s| s.ecosystem)
            .or_else(|| Self::best_file(files, None).map(|f| f.ecosystem));

        ProjectStructure {
            is_monorepo: subprojects.len() > 1,
            root_ecosystem,
            subprojects,
        }
    }
}

/// Deterministic candidate ordering: primary manifests first, then higher
/// confidence (outside the tolerance band), then shallower paths, then the
/// fixed ecosystem preference order.
fn rank(a: &DetectedFile, b: &DetectedFile) -> Ordering {
    fn type_rank(t: FileType) -> u8 {
        match t {
            FileType::Primary => 0,
            FileType::Lockfile => 1,
            FileType::Config => 2,
        }
    }

    let by_type = type_rank(a.file_type).cmp(&type_rank(b.file_type));
    if by_type != Ordering::Equal {
        return by_type;
    }

    if (a.confidence - b.confidence).abs() > CONFIDENCE_TOLERANCE {
        return b
            .confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal);
    }

    let by_depth = a.path.components().count().cmp(&b.path.components().count());
    if by_depth != Ordering::Equal {
        return by_depth;
    }

    a.ecosystem
        .preference_rank()
        .cmp(&b.ecosystem.preference_rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_confidence_bases_and_decay() {
        assert_eq!(confidence_at(FileType::Primary, 0), 0.9);
        assert_eq!(confidence_at(FileType::Lockfile, 0), 0.7);
        assert_eq!(confidence_at(FileType::Config, 0), 0.3);
        assert!((confidence_at(FileType::Primary, 1) - 0.7).abs() < 1e-9);
        assert!((confidence_at(FileType::Lockfile, 1) - 0.5).abs() < 1e-9);
        assert!((confidence_at(FileType::Config, 2) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_never_below_floor_nor_above_one() {
        for t in [FileType::Primary, FileType::Lockfile, FileType::Config] {
            let floor = match t {
                FileType::Primary => 0.5,
                FileType::Lockfile => 0.3,
                FileType::Config => 0.1,
            };
            let mut prev = f64::MAX;
            for depth in 0..10 {
                let c = confidence_at(t, depth);
                assert!(c <= 1.0);
                assert!(c >= floor, "{t} at depth {depth} fell below its floor");
                assert!(c <= prev, "{t} confidence must not increase with depth");
                prev = c;
            }
        }
    }

    #[test]
    fn test_detect_at_root_wins_without_descending() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("package.json"), "{}");
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        write(&tmp.path().join("sub/Cargo.toml"), "[package]");

        let files = Detector::new(tmp.path(), 3).detect_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].ecosystem, Ecosystem::Npm);
        assert_eq!(files[0].confidence, 0.9);
    }

    #[test]
    fn test_descends_only_when_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("api")).unwrap();
        write(&tmp.path().join("api/go.mod"), "module example.com/api\n");

        let files = Detector::new(tmp.path(), 3).detect_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].ecosystem, Ecosystem::Go);
        assert_eq!(files[0].file_type, FileType::Primary);
        assert!((files[0].confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_primary_confidence_floor_at_depth_three() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        write(&tmp.path().join("a/b/c/Gemfile"), "gem 'rails'\n");

        let files = Detector::new(tmp.path(), 3).detect_files();
        assert_eq!(files.len(), 1);
        // 0.9 - 3 * 0.2 = 0.3, clamped to the 0.5 primary floor
        assert!((files[0].confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_nuget_project_files_detected_by_extension() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("MyApp.csproj"), "<Project/>");

        let files = Detector::new(tmp.path(), 3).detect_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].ecosystem, Ecosystem::Nuget);
        assert_eq!(files[0].file_type, FileType::Primary);
    }

    #[test]
    fn test_detect_file_missing_path_fails() {
        let tmp = TempDir::new().unwrap();
        let detector = Detector::new(tmp.path(), 3);
        let err = detector
            .detect_file(&tmp.path().join("nope.txt"))
            .unwrap_err();
        assert!(matches!(err, ScanError::FileNotFound(_)));
    }

    #[test]
    fn test_detect_file_falls_back_to_sniffing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("manifest");
        write(&path, "[dependencies]\nserde = \"1.0\"\n");

        let detector = Detector::new(tmp.path(), 3);
        let detected = detector.detect_file(&path).unwrap().unwrap();
        assert_eq!(detected.ecosystem, Ecosystem::Cargo);
        assert_eq!(detected.confidence, 0.8);
        assert_eq!(detected.file_type, FileType::Primary);
    }

    #[test]
    fn test_detect_file_unrecognized_content_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        write(&path, "weekly meeting notes\n");

        let detector = Detector::new(tmp.path(), 3);
        assert!(detector.detect_file(&path).unwrap().is_none());
    }

    fn detected(path: &str, eco: Ecosystem, confidence: f64, file_type: FileType) -> DetectedFile {
        DetectedFile {
            path: PathBuf::from(path),
            ecosystem: eco,
            confidence,
            file_type,
        }
    }

    #[test]
    fn test_best_file_prefers_primary_over_higher_confidence_lockfile() {
        let files = vec![
            detected("/p/Cargo.lock", Ecosystem::Cargo, 0.7, FileType::Lockfile),
            detected("/p/sub/Cargo.toml", Ecosystem::Cargo, 0.5, FileType::Primary),
        ];
        let best = Detector::best_file(&files, None).unwrap();
        assert_eq!(best.file_type, FileType::Primary);
    }

    #[test]
    fn test_best_file_breaks_ties_by_depth_then_preference() {
        let files = vec![
            detected("/p/a/b/Cargo.toml", Ecosystem::Cargo, 0.9, FileType::Primary),
            detected("/p/package.json", Ecosystem::Npm, 0.9, FileType::Primary),
        ];
        let best = Detector::best_file(&files, None).unwrap();
        assert_eq!(best.ecosystem, Ecosystem::Npm);

        let same_depth = vec![
            detected("/p/go.mod", Ecosystem::Go, 0.9, FileType::Primary),
            detected("/p/pom.xml", Ecosystem::Maven, 0.9, FileType::Primary),
        ];
        let best = Detector::best_file(&same_depth, None).unwrap();
        assert_eq!(best.ecosystem, Ecosystem::Maven);
    }

    #[test]
    fn test_best_file_honors_hint_unless_it_empties_the_pool() {
        let files = vec![
            detected("/p/package.json", Ecosystem::Npm, 0.9, FileType::Primary),
            detected("/p/Cargo.toml", Ecosystem::Cargo, 0.9, FileType::Primary),
        ];
        let best = Detector::best_file(&files, Some(Ecosystem::Cargo)).unwrap();
        assert_eq!(best.ecosystem, Ecosystem::Cargo);

        let best = Detector::best_file(&files, Some(Ecosystem::Go)).unwrap();
        assert_eq!(best.ecosystem, Ecosystem::Npm);
    }

    #[test]
    fn test_best_file_empty_input() {
        assert!(Detector::best_file(&[], None).is_none());
    }

    #[test]
    fn test_monorepo_detection() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("frontend")).unwrap();
        std::fs::create_dir(tmp.path().join("backend")).unwrap();
        write(&tmp.path().join("frontend/package.json"), "{}");
        write(&tmp.path().join("backend/go.mod"), "module example.com/b\n");

        let detector = Detector::new(tmp.path(), 3);
        let files = detector.detect_files();
        let structure = detector.project_structure(&files);

        assert!(structure.is_monorepo);
        assert_eq!(structure.subprojects.len(), 2);
    }

    #[test]
    fn test_single_project_is_not_monorepo() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("Cargo.toml"), "[package]");
        write(&tmp.path().join("Cargo.lock"), "");

        let detector = Detector::new(tmp.path(), 3);
        let files = detector.detect_files();
        let structure = detector.project_structure(&files);

        assert!(!structure.is_monorepo);
        assert_eq!(structure.subprojects.len(), 1);
        assert_eq!(structure.subprojects[0].file_count, 2);
    }
}
