/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{FakeService, capturing_messenger};
    use photoset_tools::import::{ImportError, ImportOptions, Importer, MAX_UPLOAD_BYTES};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"data").unwrap();
        path
    }

    fn options(sort: bool, keep_going: bool) -> ImportOptions {
        ImportOptions {
            title: "Holiday".to_string(),
            sort,
            keep_going,
            ..Default::default()
        }
    }

    fn five_files(dir: &Path) -> Vec<PathBuf> {
        ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"]
            .iter()
            .map(|v| touch(dir, v))
            .collect()
    }

    #[tokio::test]
    async fn discovery_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "z.JPG");
        touch(dir.path(), "nested/deeper/clip.MOV");
        touch(dir.path(), "nested/b.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "nested/raw.cr2");
        let single = touch(dir.path(), "solo/a.gif");
        let (messenger, _) = capturing_messenger();
        let service = FakeService::default();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let files = importer
            .discover(&[dir.path().join("nested"), PathBuf::from(dir.path()).join("z.JPG"), single.clone()])
            .unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("nested/b.png"),
                dir.path().join("nested/deeper/clip.MOV"),
                single,
                dir.path().join("z.JPG"),
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn discovery_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = touch(dir.path(), "elsewhere/real.jpg");
        fs::create_dir_all(dir.path().join("album")).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("album/linked.jpg")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("elsewhere"),
            dir.path().join("album/more"),
        )
        .unwrap();
        let (messenger, _) = capturing_messenger();
        let service = FakeService::default();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let files = importer.discover(&[dir.path().join("album")]).unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("album/linked.jpg"),
                dir.path().join("album/more/real.jpg"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_path_aborts_before_upload() {
        let dir = tempfile::tempdir().unwrap();
        let good = touch(dir.path(), "a.jpg");
        let (messenger, output) = capturing_messenger();
        let service = FakeService::default();
        let importer = Importer::new(&service, &messenger, options(false, false));

        let result = importer
            .import(&[good, dir.path().join("does-not-exist")])
            .await;

        assert!(matches!(result, Err(ImportError::Discovery(1))));
        assert!(service.calls().is_empty());
        assert!(output.text().contains("no such file or directory"));
    }

    #[tokio::test]
    async fn first_upload_is_primary_and_rest_are_attached_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            touch(dir.path(), "1.jpg"),
            touch(dir.path(), "2.jpg"),
            touch(dir.path(), "3.jpg"),
        ];
        let service = FakeService::default()
            .with_upload_script("1.jpg", &[Some("A")])
            .with_upload_script("2.jpg", &[Some("B")])
            .with_upload_script("3.jpg", &[Some("C")]);
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let summary = importer.import(&files).await.unwrap();

        assert_eq!(summary.photoset_id, "set-1");
        assert_eq!(summary.photo_count, 3);
        assert_eq!(service.calls_starting_with("create:"), vec!["create:Holiday:A:"]);
        assert_eq!(
            service.calls_starting_with("add:"),
            vec!["add:set-1:B", "add:set-1:C"]
        );
    }

    #[tokio::test]
    async fn upload_is_retried_once() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            touch(dir.path(), "flaky.jpg"),
            touch(dir.path(), "broken.jpg"),
            touch(dir.path(), "fine.jpg"),
        ];
        let service = FakeService::default()
            .with_upload_script("flaky.jpg", &[None, Some("F")])
            .with_upload_script("broken.jpg", &[None, None, Some("never")]);
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(false, true));

        let outcome = importer.upload_files(&files).await;

        assert_eq!(outcome.photo_ids, vec!["F", "id-fine.jpg"]);
        assert_eq!(outcome.errors, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(service.calls_starting_with("upload:broken.jpg").len(), 2);
        assert_eq!(service.calls_starting_with("upload:flaky.jpg").len(), 2);
        assert_eq!(service.calls_starting_with("upload:fine.jpg").len(), 1);
    }

    #[tokio::test]
    async fn keep_going_tolerates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let files = five_files(dir.path());
        let service = FakeService::default()
            .with_upload_script("b.jpg", &[None, None])
            .with_upload_script("d.jpg", &[None, None]);
        let (messenger, output) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(true, true));

        let summary = importer.import(&files).await.unwrap();

        assert_eq!(summary.photo_count, 3);
        assert_eq!(
            service.calls_starting_with("create:"),
            vec!["create:Holiday:id-a.jpg:"]
        );
        assert_eq!(
            service.calls_starting_with("add:"),
            vec!["add:set-1:id-c.jpg", "add:set-1:id-e.jpg"]
        );
        assert!(output.text().contains("skipping"));
    }

    #[tokio::test]
    async fn failures_abort_without_keep_going() {
        let dir = tempfile::tempdir().unwrap();
        let files = five_files(dir.path());
        let service = FakeService::default()
            .with_upload_script("b.jpg", &[None, None])
            .with_upload_script("d.jpg", &[None, None]);
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let result = importer.import(&files).await;

        assert!(matches!(result, Err(ImportError::UploadFailed(2))));
        assert!(service.calls_starting_with("create:").is_empty());
    }

    #[tokio::test]
    async fn nothing_uploaded_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.txt");
        let service = FakeService::default();
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(false, true));

        let result = importer.import(&[dir.path().to_path_buf()]).await;

        assert!(matches!(result, Err(ImportError::NothingUploaded)));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn size_ceiling_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let exact = dir.path().join("exact.mp4");
        let over = dir.path().join("over.mp4");
        // Sparse files, nothing is actually written
        fs::File::create(&exact).unwrap().set_len(MAX_UPLOAD_BYTES).unwrap();
        fs::File::create(&over).unwrap().set_len(MAX_UPLOAD_BYTES + 1).unwrap();
        let service = FakeService::default();
        let (messenger, output) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(false, false));

        let outcome = importer.upload_files(&[exact, over]).await;

        assert_eq!(outcome.photo_ids, vec!["id-exact.mp4"]);
        assert_eq!(outcome.errors, 1);
        assert!(service.calls_starting_with("upload:over.mp4").is_empty());
        assert!(output.text().contains("exceeds the 314572800 byte limit"));
    }

    #[tokio::test]
    async fn tags_and_description_are_shared() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![touch(dir.path(), "a.jpg"), touch(dir.path(), "b.jpg")];
        let service = FakeService::default();
        let (messenger, _) = capturing_messenger();
        let options = ImportOptions {
            title: "Trip".into(),
            description: Some("by train".into()),
            tags: vec!["rail".into(), "alps".into()],
            sort: true,
            keep_going: false,
        };
        let importer = Importer::new(&service, &messenger, options);

        importer.import(&files).await.unwrap();

        assert_eq!(
            service.calls_starting_with("upload:"),
            vec!["upload:a.jpg:rail alps:by train", "upload:b.jpg:rail alps:by train"]
        );
        assert_eq!(
            service.calls_starting_with("create:"),
            vec!["create:Trip:id-a.jpg:by train"]
        );
    }

    #[tokio::test]
    async fn create_failure_stops_before_attach() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![touch(dir.path(), "a.jpg"), touch(dir.path(), "b.jpg")];
        let service = FakeService {
            fail_create: true,
            ..Default::default()
        };
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let result = importer.import(&files).await;

        assert!(matches!(result, Err(ImportError::CreatePhotoset { .. })));
        assert!(service.calls_starting_with("add:").is_empty());
    }

    #[tokio::test]
    async fn attach_failures_are_counted_but_do_not_stop() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            touch(dir.path(), "a.jpg"),
            touch(dir.path(), "b.jpg"),
            touch(dir.path(), "c.jpg"),
        ];
        let mut service = FakeService::default();
        service.failing_attach.insert("id-b.jpg".to_string());
        let (messenger, _) = capturing_messenger();
        let importer = Importer::new(&service, &messenger, options(true, false));

        let result = importer.import(&files).await;

        match result {
            Err(ImportError::Attach {
                photoset_id,
                failed,
            }) => {
                assert_eq!(photoset_id, "set-1");
                assert_eq!(failed, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            service.calls_starting_with("add:"),
            vec!["add:set-1:id-b.jpg", "add:set-1:id-c.jpg"]
        );
    }
}
