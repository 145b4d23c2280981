#![cfg(unix)]

use describe_subtree::DescribeOptions;
use describe_subtree::Error;
use describe_subtree::TestRoot;
use describe_subtree::resolve::MAX_SYMLINK_HOPS;
use describe_subtree::resolve::resolve;

fn follow() -> DescribeOptions {
    DescribeOptions {
        follow_symlinks: true,
        hash_length: Some(8),
        ..Default::default()
    }
}

#[test]
fn followed_link_to_a_hardlinked_file_is_a_reference() {
    let root = TestRoot::new().unwrap();
    root.create_file("afile.jpg", b"abc").unwrap();
    root.create_dir("sub").unwrap();
    root.hard_link("afile.jpg", "sub/zfile-hardlink.jpg").unwrap();
    root.symlink("../afile.jpg", "sub/afile-symlink.jpg").unwrap();
    let expected = "\
. dir
afile.jpg reg size 3 sha256 ba7816bf
sub dir
sub/afile-symlink.jpg ref ==> afile.jpg
sub/zfile-hardlink.jpg ref ==> afile.jpg
";
    root.assert_description(&[""], &follow(), expected);
}

#[test]
fn first_link_to_a_file_describes_the_target() {
    let root = TestRoot::new().unwrap();
    root.create_file("z/target", b"abc").unwrap();
    root.symlink("z/target", "a-link").unwrap();
    root.symlink("a-link", "b-link-to-link").unwrap();
    let expected = "\
. dir
a-link reg size 3 sha256 ba7816bf
b-link-to-link ref ==> a-link
z dir
z/target ref ==> a-link
";
    root.assert_description(&[""], &follow(), expected);
}

#[test]
fn link_to_a_directory_is_expanded_in_place() {
    let root = TestRoot::new().unwrap();
    root.create_file("z/f", b"abc").unwrap();
    root.symlink("z", "a").unwrap();
    let expected = "\
. dir
a dir
a/f reg size 3 sha256 ba7816bf
z ref ==> a
";
    root.assert_description(&[""], &follow(), expected);
}

#[test]
fn links_to_directories_sort_as_directories() {
    let root = TestRoot::new().unwrap();
    root.create_file("d/f", b"abc").unwrap();
    root.create_file("d.txt", b"").unwrap();
    root.symlink("d", "l").unwrap();
    root.symlink("d", "l-").unwrap();
    let options = DescribeOptions {
        emit_size: false,
        ..follow()
    };
    // "l-" sorts before "l/" once "l" is known to be a directory
    let expected = "\
. dir
d.txt reg
d dir
d/f reg
l- ref ==> d
l ref ==> d
";
    root.assert_description(&[""], &options, expected);
}

#[test]
fn link_to_an_ancestor_does_not_recurse() {
    let root = TestRoot::new().unwrap();
    root.create_dir("sub").unwrap();
    root.symlink("..", "sub/up").unwrap();
    root.symlink(".", "sub/here").unwrap();
    let expected = "\
. dir
sub dir
sub/here ref ==> sub
sub/up ref ==> .
";
    root.assert_description(&[""], &follow(), expected);

    let relative = DescribeOptions {
        relative_refs: true,
        ..follow()
    };
    let expected = "\
. dir
sub dir
sub/here ref => .
sub/up ref => ..
";
    root.assert_description(&[""], &relative, expected);
}

#[test]
fn followed_root_link() {
    let root = TestRoot::new().unwrap();
    root.create_file("dir/f", b"abc").unwrap();
    root.symlink("dir", "link").unwrap();
    root.assert_description(&["link"], &follow(), ". dir\nf reg size 3 sha256 ba7816bf\n");
    root.assert_description(
        &["link"],
        &DescribeOptions::default(),
        ". sym -> dir\n",
    );
}

#[test]
fn links_across_numbered_roots_use_global_order() {
    let root = TestRoot::new().unwrap();
    root.create_file("x/f", b"abc").unwrap();
    root.create_dir("y").unwrap();
    root.symlink("../x/f", "y/link").unwrap();

    root.assert_description(
        &["x", "y"],
        &follow(),
        "0 dir\n0/f reg size 3 sha256 ba7816bf\n1 dir\n1/link ref ==> 0/f\n",
    );
    root.assert_description(
        &["y", "x"],
        &follow(),
        "0 dir\n0/link reg size 3 sha256 ba7816bf\n1 dir\n1/f ref ==> 0/link\n",
    );
}

#[test]
fn broken_link_aborts() {
    let root = TestRoot::new().unwrap();
    root.create_file("afile", b"abc").unwrap();
    root.symlink("nowhere", "dangling").unwrap();
    match root.describe(&[""], &follow()).unwrap_err() {
        Error::Symlink { what, how } => {
            assert!(what.ends_with("dangling"));
            assert!(how.contains("broken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // without following, a dangling link is just a link
    root.assert_description(
        &[""],
        &DescribeOptions {
            hash_length: Some(8),
            ..Default::default()
        },
        ". dir\nafile reg size 3 sha256 ba7816bf\ndangling sym -> nowhere\n",
    );
}

#[test]
fn link_cycles_abort() {
    let root = TestRoot::new().unwrap();
    root.symlink("loop2", "loop1").unwrap();
    root.symlink("loop1", "loop2").unwrap();
    root.symlink("self", "self").unwrap();

    for link in ["loop1", "loop2", "self"] {
        match resolve(&root.join(link)).unwrap_err() {
            Error::Symlink { what, how } => {
                assert!(what.ends_with(link));
                assert!(how.contains("cycle"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(matches!(
        root.describe(&[""], &follow()),
        Err(Error::Symlink { .. })
    ));
}

#[test]
fn resolve_follows_chains() {
    let root = TestRoot::new().unwrap();
    root.create_file("dir/file", b"abc").unwrap();
    root.symlink("dir/file", "a").unwrap();
    root.symlink("a", "b").unwrap();
    let resolved = resolve(&root.join("b")).unwrap();
    assert!(resolved.metadata.is_file());
    assert!(resolved.path.ends_with("dir/file"));
}

#[test]
fn resolve_bounds_the_number_of_hops() {
    let root = TestRoot::new().unwrap();
    root.create_file("file", b"abc").unwrap();
    let chain = |prefix: &str, len: usize| {
        for i in 0..len {
            let target = if i + 1 == len {
                "file".to_string()
            } else {
                format!("{prefix}{}", i + 1)
            };
            root.symlink(&target, &format!("{prefix}{i}")).unwrap();
        }
    };
    chain("ok", MAX_SYMLINK_HOPS);
    chain("long", MAX_SYMLINK_HOPS + 1);

    assert!(resolve(&root.join("ok0")).unwrap().metadata.is_file());
    match resolve(&root.join("long0")).unwrap_err() {
        Error::Symlink { how, .. } => assert!(how.contains("levels")),
        other => panic!("unexpected error: {other:?}"),
    }
}
