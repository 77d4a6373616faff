/// 상품 조회
pub const GET_PRODUCT: &str = "SELECT * FROM products WHERE id = $1";

/// 판매 중 상품 목록 (필터 선택)
pub const LIST_PRODUCTS: &str = r#"
    SELECT * FROM products
    WHERE status = 'ACTIVE'
      AND ($1::text IS NULL OR category = $1)
      AND ($2::bigint IS NULL OR seller_id = $2)
      AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%' OR description ILIKE '%' || $3 || '%')
    ORDER BY created_at DESC
"#;

/// 판매자 본인 상품 목록 (상태 무관)
pub const LIST_SELLER_PRODUCTS: &str =
    "SELECT * FROM products WHERE seller_id = $1 ORDER BY created_at DESC";

/// 상품 여러 개 조회
pub const GET_PRODUCTS_BY_IDS: &str = "SELECT * FROM products WHERE id = ANY($1)";

/// 경매 조회
pub const GET_AUCTION: &str = "SELECT * FROM auctions WHERE id = $1";

/// 경매 목록
pub const LIST_AUCTIONS: &str = r#"
    SELECT * FROM auctions
    WHERE ($1::auction_status IS NULL OR status = $1)
    ORDER BY end_time ASC
"#;

/// 최고 입찰 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(amount) AS highest_bid FROM bids WHERE auction_id = $1";

/// 입찰 이력 조회
pub const GET_BID_HISTORY: &str = r#"
    SELECT id, auction_id, bidder_id, amount, created_at
    FROM bids
    WHERE auction_id = $1
    ORDER BY created_at DESC, id DESC
"#;

/// 장바구니 조회
pub const GET_CART: &str = r#"
    SELECT c.product_id, c.quantity, p.name, p.price, p.stock, p.unit, p.status,
           p.images[1] AS image
    FROM cart_items c
    JOIN products p ON p.id = c.product_id
    WHERE c.user_id = $1
    ORDER BY c.created_at ASC
"#;

/// 구매자 주문 목록
pub const LIST_ORDERS: &str =
    "SELECT * FROM orders WHERE buyer_id = $1 ORDER BY created_at DESC, id DESC";

/// 주문 항목 조회
pub const GET_ORDER_ITEMS: &str =
    "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC";
