//! Process-backed terminal: raw mode, input thread, resize signal.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::core::terminal::Terminal;
use crate::platform::stdin_buffer::SequenceAssembler;

#[cfg(unix)]
use libc::{self, c_int};
#[cfg(unix)]
use signal_hook::consts::SIGWINCH;
#[cfg(unix)]
use signal_hook::iterator::Signals;

const FALLBACK_COLUMNS: u16 = 80;
const FALLBACK_ROWS: u16 = 24;
const INPUT_POLL_MS: i32 = 50;

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
fn wait_writable(fd: c_int) -> std::io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result > 0 && (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }
    }
}

#[cfg(unix)]
fn write_fd(fd: c_int, data: &str) -> std::io::Result<()> {
    let bytes = data.as_bytes();
    let mut written = 0;
    while written < bytes.len() {
        let remaining = &bytes[written..];
        let result =
            unsafe { libc::write(fd, remaining.as_ptr() as *const libc::c_void, remaining.len()) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            match err.kind() {
                std::io::ErrorKind::Interrupted => continue,
                std::io::ErrorKind::WouldBlock => wait_writable(fd)?,
                _ => return Err(err),
            }
            continue;
        }
        if result == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "write returned 0",
            ));
        }
        written += result as usize;
    }
    Ok(())
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn get_termios(fd: c_int) -> std::io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> std::io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

/// Pull the longest decodable UTF-8 prefix out of `pending`.
///
/// A trailing split multi-byte sequence stays buffered for the next read;
/// invalid bytes decode lossily so one bad byte cannot wedge the stream.
fn drain_valid_utf8(pending: &mut Vec<u8>) -> Option<String> {
    if pending.is_empty() {
        return None;
    }

    match std::str::from_utf8(pending) {
        Ok(valid) => {
            let chunk = valid.to_string();
            pending.clear();
            Some(chunk)
        }
        Err(err) if err.error_len().is_some() => {
            let chunk = String::from_utf8_lossy(pending).into_owned();
            pending.clear();
            Some(chunk)
        }
        Err(err) => {
            let valid_up_to = err.valid_up_to();
            if valid_up_to == 0 {
                return None;
            }
            let chunk = String::from_utf8_lossy(&pending[..valid_up_to]).into_owned();
            pending.drain(..valid_up_to);
            Some(chunk)
        }
    }
}

#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    stop_flag: Arc<AtomicBool>,
    input_thread: Option<JoinHandle<()>>,
    resize_thread: Option<JoinHandle<()>>,
    resize_signal_handle: Option<signal_hook::iterator::Handle>,
    columns: Arc<AtomicU16>,
    rows: Arc<AtomicU16>,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        let stdout_fd = libc::STDOUT_FILENO;
        let (cols, rows) = read_winsize(stdout_fd).unwrap_or((FALLBACK_COLUMNS, FALLBACK_ROWS));
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd,
            original_termios: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            input_thread: None,
            resize_thread: None,
            resize_signal_handle: None,
            columns: Arc::new(AtomicU16::new(cols)),
            rows: Arc::new(AtomicU16::new(rows)),
            write_log_path: None,
            write_log_failed: false,
        }
    }

    /// Mirror every terminal write into a log file, escaped one chunk per line.
    pub fn set_write_log(&mut self, path: impl Into<PathBuf>) {
        self.write_log_path = Some(path.into());
        self.write_log_failed = false;
    }

    fn log_write(&mut self, data: &str) {
        let Some(path) = self.write_log_path.as_ref() else {
            return;
        };
        if self.write_log_failed {
            return;
        }

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", data.escape_debug()));
        if result.is_err() {
            self.write_log_failed = true;
        }
    }

    fn enter_raw_mode(&mut self) -> std::io::Result<()> {
        let original = get_termios(self.stdin_fd)?;
        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ISIG | libc::IEXTEN);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;
        set_termios(self.stdin_fd, &raw)?;
        self.original_termios = Some(original);
        Ok(())
    }

    fn spawn_input_thread(&mut self, mut on_input: Box<dyn FnMut(String) + Send>) {
        let stdin_fd = self.stdin_fd;
        let stop_flag = Arc::clone(&self.stop_flag);

        self.input_thread = Some(thread::spawn(move || {
            let mut pending: Vec<u8> = Vec::new();
            let mut assembler = SequenceAssembler::new();
            let mut buf = [0u8; 4096];

            while !stop_flag.load(Ordering::SeqCst) {
                if !poll_readable(stdin_fd, INPUT_POLL_MS) {
                    continue;
                }

                let count = unsafe {
                    libc::read(stdin_fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len())
                };
                if count < 0 {
                    let err = std::io::Error::last_os_error();
                    if err.kind() == std::io::ErrorKind::Interrupted {
                        continue;
                    }
                    break;
                }
                if count == 0 {
                    break;
                }

                pending.extend_from_slice(&buf[..count as usize]);
                if let Some(decoded) = drain_valid_utf8(&mut pending) {
                    if let Some(chunk) = assembler.push(&decoded) {
                        on_input(chunk);
                    }
                }
            }
        }));
    }

    fn spawn_resize_thread(
        &mut self,
        mut on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        let mut signals = Signals::new([SIGWINCH])?;
        self.resize_signal_handle = Some(signals.handle());

        let stdout_fd = self.stdout_fd;
        let columns = Arc::clone(&self.columns);
        let rows = Arc::clone(&self.rows);

        self.resize_thread = Some(thread::spawn(move || {
            for _ in signals.forever() {
                if let Some((cols, new_rows)) = read_winsize(stdout_fd) {
                    columns.store(cols, Ordering::SeqCst);
                    rows.store(new_rows, Ordering::SeqCst);
                }
                on_resize();
            }
        }));
        Ok(())
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        self.enter_raw_mode()?;
        self.stop_flag.store(false, Ordering::SeqCst);
        if let Some((cols, rows)) = read_winsize(self.stdout_fd) {
            self.columns.store(cols, Ordering::SeqCst);
            self.rows.store(rows, Ordering::SeqCst);
        }
        self.spawn_input_thread(on_input);
        self.spawn_resize_thread(on_resize)?;
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.input_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.resize_signal_handle.take() {
            handle.close();
        }
        if let Some(handle) = self.resize_thread.take() {
            let _ = handle.join();
        }
        if let Some(original) = self.original_termios.take() {
            set_termios(self.stdin_fd, &original)?;
        }
        Ok(())
    }

    fn write(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        self.log_write(data);
        if let Err(err) = write_fd(self.stdout_fd, data) {
            panic!("failed to write to terminal: {err}");
        }
    }

    fn columns(&self) -> u16 {
        self.columns.load(Ordering::SeqCst)
    }

    fn rows(&self) -> u16 {
        self.rows.load(Ordering::SeqCst)
    }
}
