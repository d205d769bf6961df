//! # 标准输入输出后端
//!
//! 主机模拟器和测试使用的后端。写入总是阻塞到全部数据交给内核，
//! 每次写入后刷新；标准输出不是终端（被重定向到文件或管道）时，
//! 再把数据同步到底层文件，同步失败被忽略。
//!
//! Unix 上输入输出各复制一份文件描述符，绕过标准库的行缓冲，
//! 读取因此是无缓冲的。复制出的描述符与原描述符共享文件状态，
//! `init` 会清除从父进程继承来的 `O_NONBLOCK`，读取总是阻塞等待输入。
//!
//! 核心逻辑在泛型的 [`StreamTransport`] 中，可以用内存流测试。

#[cfg(unix)]
use std::fs::File;
use std::io::{self, Read, Write};
#[cfg(unix)]
use std::io::IsTerminal;
#[cfg(unix)]
use std::os::fd::AsFd;

use crate::drivers::Transport;
use crate::error::{MadiError, Result};

/// 后端名称
pub const NAME: &str = "stdio";

/// 输出同步函数
pub type SyncFn<W> = fn(&mut W) -> io::Result<()>;

// ============================================================================
// 通用流后端
// ============================================================================

/// 基于任意读写流的传输后端
pub struct StreamTransport<R, W> {
    input: R,
    output: W,
    sync: Option<SyncFn<W>>,
}

impl<R, W> StreamTransport<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            sync: None,
        }
    }

    /// 每次刷新后调用 `sync` 把数据落到存储上
    pub fn with_sync(mut self, sync: SyncFn<W>) -> Self {
        self.sync = Some(sync);
        self
    }

    /// 是否在写入后同步
    pub fn syncs_output(&self) -> bool {
        self.sync.is_some()
    }

    pub fn input_mut(&mut self) -> &mut R {
        &mut self.input
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: Read + Send, W: Write + Send> Transport for StreamTransport<R, W> {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        self.output.write_all(data)?;
        self.output.flush()?;
        if let Some(sync) = self.sync {
            let _ = sync(&mut self.output);
        }
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.input.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

// ============================================================================
// 进程标准输入输出
// ============================================================================

#[cfg(unix)]
type StdIn = File;
#[cfg(unix)]
type StdOut = File;
#[cfg(not(unix))]
type StdIn = io::Stdin;
#[cfg(not(unix))]
type StdOut = io::Stdout;

#[cfg(unix)]
fn sync_file(file: &mut File) -> io::Result<()> {
    file.sync_data()
}

/// 清除描述符上的 `O_NONBLOCK`
#[cfg(unix)]
fn set_blocking(fd: impl AsFd) -> io::Result<()> {
    use rustix::fs::{OFlags, fcntl_getfl, fcntl_setfl};

    let flags = fcntl_getfl(&fd)?;
    if flags.contains(OFlags::NONBLOCK) {
        fcntl_setfl(&fd, flags.difference(OFlags::NONBLOCK))?;
    }
    Ok(())
}

/// 复制一对描述符并切换到阻塞模式
#[cfg(unix)]
fn open_stream(input: impl AsFd, output: impl AsFd) -> io::Result<StreamTransport<File, File>> {
    let input = File::from(input.as_fd().try_clone_to_owned()?);
    let output = File::from(output.as_fd().try_clone_to_owned()?);
    set_blocking(&input)?;
    set_blocking(&output)?;
    Ok(StreamTransport::new(input, output))
}

#[cfg(unix)]
fn open_stdio() -> io::Result<StreamTransport<StdIn, StdOut>> {
    let stream = open_stream(io::stdin(), io::stdout())?;
    if io::stdout().is_terminal() {
        Ok(stream)
    } else {
        Ok(stream.with_sync(sync_file))
    }
}

#[cfg(not(unix))]
fn open_stdio() -> io::Result<StreamTransport<StdIn, StdOut>> {
    Ok(StreamTransport::new(io::stdin(), io::stdout()))
}

/// 进程标准输入输出后端
pub struct StdioTransport {
    stream: Option<StreamTransport<StdIn, StdOut>>,
}

impl StdioTransport {
    pub const fn new() -> Self {
        Self { stream: None }
    }

    /// 标准输出被重定向时是否会同步到文件
    pub fn syncs_output(&self) -> bool {
        self.stream
            .as_ref()
            .is_some_and(StreamTransport::syncs_output)
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for StdioTransport {
    fn init(&mut self) -> Result<()> {
        self.stream = Some(open_stdio()?);
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.stream
            .as_mut()
            .ok_or(MadiError::DeviceUnavailable)?
            .write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream
            .as_mut()
            .ok_or(MadiError::DeviceUnavailable)?
            .read(buf)
    }
}
