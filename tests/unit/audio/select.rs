use super::*;
use crate::foundation::core::{Canvas, Fps, Rgba8Premul};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"not really audio").unwrap();
    p
}

#[test]
fn lists_only_audio_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b.wav");
    touch(dir.path(), "a.MP3");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "noext");
    std::fs::create_dir(dir.path().join("nested.mp3")).unwrap();

    let names: Vec<_> = list_audio_files(dir.path())
        .unwrap()
        .into_iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.MP3", "b.wav"]);
}

#[test]
fn no_directory_means_no_audio() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(select_audio_file(None, &mut rng).unwrap(), None);
    assert_eq!(
        select_audio_file(Some(Path::new("/no/such/audio/dir")), &mut rng).unwrap(),
        None
    );

    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "readme.md");
    assert_eq!(select_audio_file(Some(dir.path()), &mut rng).unwrap(), None);
}

#[test]
fn a_file_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = touch(dir.path(), "song.mp3");
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(select_audio_file(Some(&file), &mut rng).unwrap(), None);
}

#[test]
fn seeded_selection_is_deterministic_and_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let all: Vec<_> = ["one.mp3", "two.wav", "three.mp3"]
        .into_iter()
        .map(|n| touch(dir.path(), n))
        .collect();

    let pick = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        select_audio_file(Some(dir.path()), &mut rng).unwrap().unwrap()
    };
    for seed in 0..16 {
        let a = pick(seed);
        assert_eq!(a, pick(seed));
        assert!(all.contains(&a));
    }
}

#[test]
fn empty_directory_leaves_composite_silent() {
    let dir = tempfile::tempdir().unwrap();
    let c = Composite::new(
        Canvas::VERTICAL_HD,
        Fps::new(30, 1).unwrap(),
        2.0,
        Rgba8Premul::opaque_black(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let out = attach_background_audio(&c, Some(dir.path()), &mut rng).unwrap();
    assert_eq!(out, c);
    assert!(out.audio().is_none());
}
