use positioned_io2::ReadAt;

pub trait ReadAtExt {
    fn read_pod_owned<T: bytemuck::Pod>(&self, offset: u64) -> std::io::Result<T>;
}

impl<R: ReadAt + ?Sized> ReadAtExt for R {
    fn read_pod_owned<T: bytemuck::Pod>(&self, offset: u64) -> std::io::Result<T> {
        let mut buf = vec![0u8; std::mem::size_of::<T>()];
        self.read_exact_at(offset, &mut buf)?;
        bytemuck::try_pod_read_unaligned::<T>(&buf)
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "bytemuck error"))
    }
}
