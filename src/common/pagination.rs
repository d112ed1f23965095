// src/common/pagination.rs

// Tamanho fixo de página usado por todas as telas de listagem
pub const PAGE_SIZE: usize = 20;

// Sempre pelo menos 1 página, mesmo com a coleção vazia
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

// Páginas são 1-indexadas e ficam em [1, total_pages]
pub fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(count, page_size))
}

// Fatia [(page-1)*size, page*size) na ordem recebida do backend
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = clamp_page(page, items.len(), page_size);
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

// Linha "1 - 20 dari 45"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

pub fn page_range(page: usize, count: usize, page_size: usize) -> PageRange {
    if count == 0 {
        return PageRange { first: 0, last: 0, total: 0 };
    }
    let page = clamp_page(page, count, page_size);
    PageRange {
        first: (page - 1) * page_size + 1,
        last: (page * page_size).min(count),
        total: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_never_below_one() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(20, PAGE_SIZE), 1);
        assert_eq!(total_pages(21, PAGE_SIZE), 2);
        assert_eq!(total_pages(45, PAGE_SIZE), 3);
    }

    #[test]
    fn slice_lengths_match_window() {
        let items: Vec<usize> = (0..45).collect();
        for n in [0usize, 1, 19, 20, 21, 40, 45] {
            let data = &items[..n];
            for page in 1..=total_pages(n, PAGE_SIZE) {
                let expected = if n == 0 {
                    0
                } else {
                    PAGE_SIZE.min(n - (page - 1) * PAGE_SIZE)
                };
                assert_eq!(paginate(data, page, PAGE_SIZE).len(), expected, "n={n} page={page}");
            }
        }
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(paginate(&items, 0, PAGE_SIZE), &items[0..20]);
        assert_eq!(paginate(&items, 99, PAGE_SIZE), &items[20..23]);
        assert_eq!(clamp_page(5, 0, PAGE_SIZE), 1);
    }

    #[test]
    fn range_line() {
        assert_eq!(page_range(1, 0, PAGE_SIZE), PageRange { first: 0, last: 0, total: 0 });
        assert_eq!(page_range(2, 45, PAGE_SIZE), PageRange { first: 21, last: 40, total: 45 });
        assert_eq!(page_range(3, 45, PAGE_SIZE), PageRange { first: 41, last: 45, total: 45 });
    }
}
