//! End-to-end stream scenarios over the in-memory store.

use hearth_abi::errno::{EINVAL, EISDIR, ENOENT, ShimError};
use hearth_abi::file::{MAX_OPEN_STREAMS, OpenMode};
use hearth_abi::stat::{SEEK_CUR, SEEK_END, SEEK_SET};
use hearth_fs::{
    StreamId, stream_close, stream_eof, stream_flush, stream_open, stream_read, stream_seek,
    stream_stat, stream_tell, stream_write,
};
use hearth_lib::errno::last_error;
use hearth_tests::env::test_env;

fn mode(text: &str) -> OpenMode {
    OpenMode::from_mode_str(text.as_bytes()).unwrap()
}

#[test]
fn write_then_read_round_trip() {
    let (_guard, env) = test_env();

    let id = stream_open(b"/round.txt", mode("w")).unwrap();
    assert_eq!(stream_write(id, b"HELLO").unwrap(), 5);
    stream_close(id).unwrap();
    assert_eq!(env.store.contents(b"/round.txt").unwrap(), b"HELLO");

    let id = stream_open(b"/round.txt", mode("r")).unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(stream_read(id, &mut buf).unwrap(), 5);
    assert_eq!(&buf[..5], b"HELLO");
    assert_eq!(stream_read(id, &mut buf).unwrap(), 0);
    assert!(stream_eof(id).unwrap());
    stream_close(id).unwrap();
}

#[test]
fn eof_latches_only_past_the_end() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/exact.bin", b"WXYZ");

    let id = stream_open(b"/exact.bin", mode("r")).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(stream_read(id, &mut buf).unwrap(), 4);
    assert!(!stream_eof(id).unwrap());
    assert_eq!(stream_read(id, &mut buf[..1]).unwrap(), 0);
    assert!(stream_eof(id).unwrap());
    stream_close(id).unwrap();
}

#[test]
fn large_reads_bypass_the_window() {
    let (_guard, env) = test_env();
    let payload: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
    env.store.seed_file(b"/lump.bin", &payload);

    let id = stream_open(b"/lump.bin", mode("r")).unwrap();
    let mut buf = vec![0u8; 2000];
    assert_eq!(stream_read(id, &mut buf).unwrap(), 2000);
    assert_eq!(buf, payload);
    assert!(!stream_eof(id).unwrap());
    assert_eq!(stream_read(id, &mut buf[..1]).unwrap(), 0);
    stream_close(id).unwrap();
}

#[test]
fn seek_tell_and_reread() {
    let (_guard, _env) = test_env();

    let id = stream_open(b"/seek.txt", mode("w+")).unwrap();
    stream_write(id, b"abcdef").unwrap();
    assert_eq!(stream_tell(id).unwrap(), 6);

    assert_eq!(stream_seek(id, 2, SEEK_SET).unwrap(), 2);
    let mut two = [0u8; 2];
    assert_eq!(stream_read(id, &mut two).unwrap(), 2);
    assert_eq!(&two, b"cd");

    assert_eq!(stream_seek(id, -1, SEEK_CUR).unwrap(), 3);
    assert_eq!(stream_seek(id, -2, SEEK_END).unwrap(), 4);

    assert_eq!(stream_seek(id, -1, SEEK_SET), Err(ShimError::InvalidArgument));
    assert_eq!(last_error(), EINVAL);
    assert_eq!(stream_seek(id, 0, 99), Err(ShimError::InvalidArgument));
    stream_close(id).unwrap();
}

#[test]
fn seek_past_end_write_zero_fills() {
    let (_guard, env) = test_env();

    let id = stream_open(b"/sparse.bin", mode("w")).unwrap();
    assert_eq!(stream_seek(id, 10, SEEK_SET).unwrap(), 10);
    stream_write(id, b"X").unwrap();
    stream_close(id).unwrap();

    let data = env.store.contents(b"/sparse.bin").unwrap();
    assert_eq!(data.len(), 11);
    assert_eq!(&data[..10], &[0u8; 10]);
    assert_eq!(data[10], b'X');
}

#[test]
fn seek_clears_eof() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/clear.txt", b"ab");

    let id = stream_open(b"/clear.txt", mode("r")).unwrap();
    let mut buf = [0u8; 8];
    stream_read(id, &mut buf).unwrap();
    assert!(stream_eof(id).unwrap());
    stream_seek(id, 0, SEEK_SET).unwrap();
    assert!(!stream_eof(id).unwrap());
    stream_close(id).unwrap();
}

#[test]
fn w_mode_truncates_existing_contents() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/trunc.txt", b"OLDDATA");

    let id = stream_open(b"/trunc.txt", mode("w")).unwrap();
    stream_close(id).unwrap();
    assert_eq!(env.store.contents(b"/trunc.txt").unwrap(), b"");
}

#[test]
fn append_writes_land_at_the_end() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/app.txt", b"AB");

    let id = stream_open(b"/app.txt", mode("a")).unwrap();
    assert_eq!(stream_tell(id).unwrap(), 2);
    stream_write(id, b"CD").unwrap();
    stream_seek(id, 0, SEEK_SET).unwrap();
    stream_write(id, b"EF").unwrap();
    stream_close(id).unwrap();

    assert_eq!(env.store.contents(b"/app.txt").unwrap(), b"ABCDEF");
}

#[test]
fn staged_bytes_count_toward_tell_and_stat() {
    let (_guard, env) = test_env();

    let id = stream_open(b"/staged.txt", mode("w")).unwrap();
    stream_write(id, b"abc").unwrap();
    assert_eq!(stream_tell(id).unwrap(), 3);
    // Nothing hit the store yet.
    assert_eq!(env.store.contents(b"/staged.txt").unwrap(), b"");

    let info = stream_stat(id).unwrap();
    assert!(info.is_reg());
    assert_eq!(info.st_size, 3);
    // stat flushed the staged run.
    assert_eq!(env.store.contents(b"/staged.txt").unwrap(), b"abc");

    stream_flush(id).unwrap();
    stream_close(id).unwrap();
}

#[test]
fn stale_tokens_are_rejected() {
    let (_guard, _env) = test_env();

    let id = stream_open(b"/stale.txt", mode("w")).unwrap();
    let token = id.as_token();
    stream_close(id).unwrap();

    let stale = StreamId::from_token(token).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(stream_read(stale, &mut buf), Err(ShimError::InvalidArgument));
    assert_eq!(last_error(), EINVAL);
    assert_eq!(stream_close(stale), Err(ShimError::InvalidArgument));
}

#[test]
fn slot_reuse_invalidates_old_generation() {
    let (_guard, _env) = test_env();

    let first = stream_open(b"/gen-a.txt", mode("w")).unwrap();
    let old_token = first.as_token();
    stream_close(first).unwrap();

    // The freed slot is reused with a bumped generation.
    let second = stream_open(b"/gen-b.txt", mode("w")).unwrap();
    assert_ne!(second.as_token(), old_token);

    let stale = StreamId::from_token(old_token).unwrap();
    assert_eq!(stream_tell(stale), Err(ShimError::InvalidArgument));

    stream_close(second).unwrap();
}

#[test]
fn directories_do_not_open_as_streams() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/somedir/inner.txt", b"x");

    assert_eq!(
        stream_open(b"/somedir", mode("r")),
        Err(ShimError::IsADirectory)
    );
    assert_eq!(last_error(), EISDIR);
}

#[test]
fn missing_file_without_create_fails() {
    let (_guard, _env) = test_env();

    assert_eq!(
        stream_open(b"/nowhere.wad", mode("r")),
        Err(ShimError::NoSuchEntry)
    );
    assert_eq!(last_error(), ENOENT);
}

#[test]
fn table_exhaustion_and_recovery() {
    let (_guard, _env) = test_env();

    let mut open = Vec::new();
    for i in 0..MAX_OPEN_STREAMS {
        let path = format!("/slot{i}.bin");
        open.push(stream_open(path.as_bytes(), mode("w")).unwrap());
    }
    assert_eq!(
        stream_open(b"/one-too-many.bin", mode("w")),
        Err(ShimError::IoError)
    );
    for id in open {
        stream_close(id).unwrap();
    }
    // All slots are free again.
    let id = stream_open(b"/after.bin", mode("w")).unwrap();
    stream_close(id).unwrap();
}

#[test]
fn read_on_write_only_stream_fails() {
    let (_guard, _env) = test_env();

    let id = stream_open(b"/wonly.txt", mode("w")).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(stream_read(id, &mut buf), Err(ShimError::InvalidArgument));
    assert_eq!(stream_write(id, b"ok").unwrap(), 2);
    stream_close(id).unwrap();

    let id = stream_open(b"/wonly.txt", mode("r")).unwrap();
    assert_eq!(stream_write(id, b"no"), Err(ShimError::InvalidArgument));
    stream_close(id).unwrap();
}

#[test]
fn interleaved_read_write_with_seeks() {
    let (_guard, env) = test_env();
    env.store.seed_file(b"/mix.txt", b"....conf");

    let id = stream_open(b"/mix.txt", mode("r+")).unwrap();
    let mut head = [0u8; 4];
    assert_eq!(stream_read(id, &mut head).unwrap(), 4);
    stream_seek(id, 0, SEEK_SET).unwrap();
    stream_write(id, b"good").unwrap();
    stream_close(id).unwrap();

    assert_eq!(env.store.contents(b"/mix.txt").unwrap(), b"goodconf");
}
